use crate::geometry::{CubicSegment, Segment};
use crate::math::{factorial, falling_factorial, VectorSpace};

/// Cubic Hermite segment through `p0` and `p1` with end tangents `t0`, `t1`.
#[must_use]
pub fn hermite_segment<V: VectorSpace>(p0: V, t0: V, p1: V, t1: V) -> CubicSegment<V> {
    Segment::new([
        p0,
        t0,
        p1 * 3.0 - p0 * 3.0 - t0 * 2.0 - t1,
        p0 * 2.0 - p1 * 2.0 + t0 + t1,
    ])
}

/// Cubic Bezier segment from four Bernstein control points.
///
/// The curve starts at `p[0]`, ends at `p[3]`, and is tangent to the
/// control polygon at both ends.
#[must_use]
pub fn bezier_segment<V: VectorSpace>(p: &[V; 4]) -> CubicSegment<V> {
    let [p0, p1, p2, p3] = *p;
    Segment::new([
        p0,
        p1 * 3.0 - p0 * 3.0,
        p0 * 3.0 - p1 * 6.0 + p2 * 3.0,
        p1 * 3.0 - p0 - p2 * 3.0 + p3,
    ])
}

/// Uniform cubic B-spline segment from a window of four control points.
///
/// The segment runs between the blends of `p[0..3]` and `p[1..4]`; it does
/// not pass through the control points themselves.
#[must_use]
pub fn bspline_segment<V: VectorSpace>(p: &[V; 4]) -> CubicSegment<V> {
    let [p0, p1, p2, p3] = *p;
    Segment::new([
        p0 / 6.0 + p1 * (2.0 / 3.0) + p2 / 6.0,
        (p2 - p0) / 2.0,
        p0 / 2.0 - p1 + p2 / 2.0,
        p1 / 2.0 - p0 / 6.0 - p2 / 2.0 + p3 / 6.0,
    ])
}

/// Bezier segment of degree `N - 1` from `N` Bernstein control points.
///
/// Power-basis coefficient `i` is
/// `n!/(n-i)! * sum_{k<=i} (-1)^(i+k) P_k / (k! (i-k)!)` with `n = N - 1`.
#[must_use]
pub fn bezier_n_segment<V: VectorSpace, const N: usize>(p: &[V; N]) -> Segment<V, N> {
    let n = N.saturating_sub(1);
    Segment::new(std::array::from_fn(|i| {
        let sum = p[..=i].iter().enumerate().fold(V::zero(), |acc, (k, &pk)| {
            let sign = if (i + k) % 2 == 0 { 1.0 } else { -1.0 };
            acc + pk * (sign / (factorial(k) * factorial(i - k)))
        });
        sum * falling_factorial(n, i)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Curve;
    use crate::math::Vector2;

    const TOL: f64 = 1e-12;

    fn arch() -> [Vector2; 4] {
        [
            Vector2::new(0.0, 0.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(1.0, 0.0),
        ]
    }

    #[test]
    fn hermite_matches_end_conditions() {
        let p0 = Vector2::new(0.0, 0.0);
        let p1 = Vector2::new(4.0, 1.0);
        let t0 = Vector2::new(1.0, 2.0);
        let t1 = Vector2::new(3.0, -1.0);
        let s = hermite_segment(p0, t0, p1, t1);
        assert!((s.evaluate(0.0) - p0).norm() < TOL);
        assert!((s.evaluate(1.0) - p1).norm() < TOL);
        assert!((s.derivative(1, 0.0) - t0).norm() < TOL);
        assert!((s.derivative(1, 1.0) - t1).norm() < TOL);
    }

    #[test]
    fn bezier_interpolates_end_points() {
        let s = bezier_segment(&arch());
        assert!((s.evaluate(0.0) - Vector2::new(0.0, 0.0)).norm() < TOL);
        assert!((s.evaluate(1.0) - Vector2::new(1.0, 0.0)).norm() < TOL);
        assert!((s.evaluate(0.5) - Vector2::new(0.5, 0.75)).norm() < TOL);
        // End tangents follow the control polygon.
        assert!((s.derivative(1, 0.0) - Vector2::new(0.0, 3.0)).norm() < TOL);
        assert!((s.derivative(1, 1.0) - Vector2::new(0.0, -3.0)).norm() < TOL);
    }

    #[test]
    fn n_order_bezier_agrees_with_cubic() {
        let p = arch();
        let cubic = bezier_segment(&p);
        let general = bezier_n_segment(&p);
        for (a, b) in cubic.coefficients().iter().zip(general.coefficients()) {
            assert!((a - b).norm() < TOL);
        }
    }

    #[test]
    fn quadratic_bezier() {
        let p = [
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 2.0),
            Vector2::new(2.0, 0.0),
        ];
        let s = bezier_n_segment(&p);
        assert_eq!(s.degree(), 2);
        // B(0.5) = P0/4 + P1/2 + P2/4
        assert!((s.evaluate(0.5) - Vector2::new(1.0, 1.0)).norm() < TOL);
        assert!((s.evaluate(1.0) - p[2]).norm() < TOL);
    }

    #[test]
    fn quintic_bezier_matches_bernstein_sum() {
        let p: [f64; 6] = [0.0, 1.0, -2.0, 4.0, 0.5, 3.0];
        let s = bezier_n_segment(&p);
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            let bernstein: f64 = (0..6)
                .map(|k| {
                    let exponent = i32::try_from(k).unwrap_or_default();
                    crate::math::binomial(5, k)
                        * t.powi(exponent)
                        * (1.0 - t).powi(5 - exponent)
                        * p[k]
                })
                .sum();
            assert!((s.evaluate(t) - bernstein).abs() < 1e-10, "t={t}");
        }
    }

    #[test]
    fn bspline_blends_window() {
        let p = arch();
        let s = bspline_segment(&p);
        let start = p[0] / 6.0 + p[1] * (2.0 / 3.0) + p[2] / 6.0;
        let end = p[1] / 6.0 + p[2] * (2.0 / 3.0) + p[3] / 6.0;
        assert!((s.evaluate(0.0) - start).norm() < TOL);
        assert!((s.evaluate(1.0) - end).norm() < TOL);
        assert!((s.derivative(1, 0.0) - (p[2] - p[0]) / 2.0).norm() < TOL);
    }
}
