use crate::geometry::{CubicSegment, Segment};
use crate::math::VectorSpace;

use super::basis::{bezier_n_segment, bezier_segment, bspline_segment, hermite_segment};
use super::ControlPoint;

/// Cubic Bezier segments over consecutive 4-point windows sharing their ends.
///
/// Points `0..=3` form the first segment, `3..=6` the second, and so on.
/// Trailing points that do not complete a window are ignored.
#[must_use]
pub fn bezier_segments<V: VectorSpace>(points: &[V]) -> Vec<CubicSegment<V>> {
    points
        .windows(4)
        .step_by(3)
        .filter_map(|window| <&[V; 4]>::try_from(window).ok())
        .map(bezier_segment)
        .collect()
}

/// Bezier segments of degree `N - 1` over `N`-point windows sharing their ends.
///
/// Returns no segments for `N < 2`.
#[must_use]
pub fn bezier_n_segments<V: VectorSpace, const N: usize>(points: &[V]) -> Vec<Segment<V, N>> {
    if N < 2 {
        return Vec::new();
    }
    points
        .windows(N)
        .step_by(N - 1)
        .filter_map(|window| <&[V; N]>::try_from(window).ok())
        .map(bezier_n_segment)
        .collect()
}

/// Catmull-Rom tangent at point `i`: `(p[i + 1] - p[i - 1]) / 2`.
///
/// Neighbours past either end are clamped to the end point.
fn catmull_rom_tangent<V: VectorSpace>(points: &[V], i: usize) -> V {
    let last = points.len().saturating_sub(1);
    (points[(i + 1).min(last)] - points[i.saturating_sub(1)]) / 2.0
}

/// Catmull-Rom segments interpolating every point.
///
/// Each pair of neighbours becomes a Hermite segment with Catmull-Rom
/// tangents, giving a C1 curve.
#[must_use]
pub fn catmull_rom_segments<V: VectorSpace>(points: &[V]) -> Vec<CubicSegment<V>> {
    (1..points.len())
        .map(|i| {
            hermite_segment(
                points[i - 1],
                catmull_rom_tangent(points, i - 1),
                points[i],
                catmull_rom_tangent(points, i),
            )
        })
        .collect()
}

/// Uniform cubic B-spline segments, one per pair of neighbouring points.
///
/// Ghost points `2 p[0] - p[1]` and `2 p[last] - p[last - 1]` are added at
/// both ends, so the curve starts at the first point and ends at the last.
/// The result is C2.
#[must_use]
pub fn bspline_segments<V: VectorSpace>(points: &[V]) -> Vec<CubicSegment<V>> {
    let [first, second, ..] = points else {
        return Vec::new();
    };
    let [.., before_last, last] = points else {
        return Vec::new();
    };

    let mut extended = Vec::with_capacity(points.len() + 2);
    extended.push(*first * 2.0 - *second);
    extended.extend_from_slice(points);
    extended.push(*last * 2.0 - *before_last);

    extended
        .windows(4)
        .filter_map(|window| <&[V; 4]>::try_from(window).ok())
        .map(bspline_segment)
        .collect()
}

/// Hermite segments through the control positions.
///
/// A control point without an explicit tangent takes the Catmull-Rom tangent
/// of its position.
#[must_use]
pub fn hermite_segments<V: VectorSpace>(controls: &[ControlPoint<V>]) -> Vec<CubicSegment<V>> {
    let positions: Vec<V> = controls.iter().map(|c| c.position).collect();
    let tangents: Vec<V> = controls
        .iter()
        .enumerate()
        .map(|(i, c)| {
            c.tangent
                .unwrap_or_else(|| catmull_rom_tangent(&positions, i))
        })
        .collect();

    positions
        .windows(2)
        .zip(tangents.windows(2))
        .map(|(p, t)| hermite_segment(p[0], t[0], p[1], t[1]))
        .collect()
}
