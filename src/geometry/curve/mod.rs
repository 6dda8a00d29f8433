mod segment;

pub use segment::{CubicSegment, Segment};

use crate::error::{GeometryError, Result};
use crate::math::{Perp, VectorSpace, DEGENERACY_THRESHOLD};
use crate::tessellation::Approximate;

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// The unit domain `[0, 1]` of a single segment.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// A single polynomial curve piece parameterized over `[0, 1]`.
///
/// Implementors provide evaluation and closed-form derivatives; every
/// differential-geometry query is derived from those two. Parameters outside
/// `[0, 1]` extrapolate.
pub trait Curve {
    /// The value type the curve maps parameters to.
    type Value: VectorSpace;

    /// Polynomial degree of the curve.
    fn degree(&self) -> usize;

    /// Evaluates the curve at parameter `t`.
    fn evaluate(&self, t: f64) -> Self::Value;

    /// Evaluates the `order`-th derivative at parameter `t`.
    ///
    /// Order `0` is [`Curve::evaluate`]; orders above the degree are zero.
    fn derivative(&self, order: usize, t: f64) -> Self::Value;

    /// The start point, `evaluate(0)`.
    fn origin(&self) -> Self::Value {
        self.evaluate(0.0)
    }

    /// The end point, `evaluate(1)`.
    fn ending(&self) -> Self::Value {
        self.evaluate(1.0)
    }

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    /// Curvature `|d1 x d2| / |d1|^3` at parameter `t`.
    ///
    /// Non-finite where the first derivative vanishes.
    fn curvature(&self, t: f64) -> f64 {
        let d1 = self.derivative(1, t);
        let d2 = self.derivative(2, t);
        let speed = d1.norm();
        d1.cross_norm(&d2) / (speed * speed * speed)
    }

    /// Radius of curvature, the reciprocal of [`Curve::curvature`].
    ///
    /// Infinite on straight stretches.
    fn radius(&self, t: f64) -> f64 {
        let d1 = self.derivative(1, t);
        let d2 = self.derivative(2, t);
        let speed = d1.norm();
        (speed * speed * speed) / d1.cross_norm(&d2)
    }

    /// Torsion at parameter `t`.
    ///
    /// # Errors
    ///
    /// Always returns [`GeometryError::Unsupported`]; torsion is not computed.
    fn torsion(&self, _t: f64) -> Result<f64> {
        Err(GeometryError::Unsupported("torsion").into())
    }

    /// Torsion radius, the reciprocal of [`Curve::torsion`].
    ///
    /// # Errors
    ///
    /// Always returns [`GeometryError::Unsupported`], as torsion does.
    fn torsion_radius(&self, t: f64) -> Result<f64> {
        self.torsion(t).map(f64::recip)
    }

    /// Unit tangent direction at parameter `t`.
    ///
    /// Uses the lowest-order derivative that does not vanish at `t`. When all
    /// derivatives vanish the normalized chord `ending - origin` is used, and
    /// a constant curve yields the zero vector.
    fn direction(&self, t: f64) -> Self::Value {
        for order in 1..=self.degree() {
            let d = self.derivative(order, t);
            if d.norm() >= DEGENERACY_THRESHOLD {
                return d.normalized();
            }
        }
        let chord = self.ending() - self.origin();
        if chord.norm() < DEGENERACY_THRESHOLD {
            Self::Value::zero()
        } else {
            chord.normalized()
        }
    }

    /// Unit normal: the direction rotated by 90 degrees counter-clockwise.
    ///
    /// Only planar value types have a canonical perpendicular.
    fn normal(&self, t: f64) -> Self::Value
    where
        Self::Value: Perp,
    {
        self.direction(t).perp()
    }

    /// Binormal: direction crossed with normal (zero for planar curves).
    fn binormal(&self, t: f64) -> Self::Value
    where
        Self::Value: Perp,
    {
        let direction = self.direction(t);
        direction.wedge(&direction.perp())
    }

    /// Lazily flattens the curve into polyline vertices.
    ///
    /// See [`Approximate`] for the subdivision rule.
    fn approximate(&self, accuracy: f64) -> Approximate<'_, Self>
    where
        Self: Sized,
    {
        Approximate::new(self, accuracy)
    }
}
