mod tessellate_curve;

pub use tessellate_curve::{Approximate, SplineApproximate};

use crate::math::VectorSpace;

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline<V> {
    /// The ordered vertices of the polyline.
    pub points: Vec<V>,
}

impl<V: VectorSpace> Polyline<V> {
    /// Total length of the polyline.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).norm())
            .sum()
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the polyline has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<V> FromIterator<V> for Polyline<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2;

    #[test]
    fn length_sums_edges() {
        let polyline: Polyline<Vector2> = [
            Vector2::new(0.0, 0.0),
            Vector2::new(3.0, 4.0),
            Vector2::new(3.0, 10.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(polyline.len(), 3);
        assert!((polyline.length() - 11.0).abs() < 1e-12);
    }

    #[test]
    fn empty_polyline_has_zero_length() {
        let polyline = Polyline::<Vector2>::default();
        assert!(polyline.is_empty());
        assert!(polyline.length().abs() < f64::EPSILON);
    }
}
