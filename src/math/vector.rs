use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};

use super::{Vector2, Vector3};

/// Algebraic contract for the values a curve produces.
///
/// A value type is a real vector space over `f64` with a Euclidean norm.
/// `cross_norm` is the magnitude of the cross product, which is all the
/// curvature formula needs; for planar vectors it is the absolute value of
/// the scalar cross product, for scalars it is zero.
pub trait VectorSpace:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + AbsDiffEq<Epsilon = f64>
    + RelativeEq
{
    /// The additive identity.
    fn zero() -> Self;

    /// Euclidean length.
    fn norm(&self) -> f64;

    /// Magnitude of the cross product `self x rhs`.
    fn cross_norm(&self, rhs: &Self) -> f64;

    /// Returns the vector scaled to unit length.
    ///
    /// The zero vector has no direction; the result is then non-finite.
    #[must_use]
    fn normalized(&self) -> Self {
        *self / self.norm()
    }
}

/// Planar operations used for normals and binormals.
pub trait Perp: VectorSpace {
    /// Rotates the vector by 90 degrees counter-clockwise.
    #[must_use]
    fn perp(&self) -> Self;

    /// Cross product projected back into the value space.
    ///
    /// For planar vectors the cross product is orthogonal to the plane, so
    /// the projection is zero.
    #[must_use]
    fn wedge(&self, rhs: &Self) -> Self;
}

impl VectorSpace for f64 {
    fn zero() -> Self {
        0.0
    }

    fn norm(&self) -> f64 {
        self.abs()
    }

    fn cross_norm(&self, _rhs: &Self) -> f64 {
        0.0
    }
}

impl VectorSpace for Vector2 {
    fn zero() -> Self {
        Vector2::zeros()
    }

    fn norm(&self) -> f64 {
        nalgebra::Matrix::norm(self)
    }

    fn cross_norm(&self, rhs: &Self) -> f64 {
        self.perp(rhs).abs()
    }
}

impl Perp for Vector2 {
    fn perp(&self) -> Self {
        Vector2::new(-self.y, self.x)
    }

    fn wedge(&self, _rhs: &Self) -> Self {
        Vector2::zeros()
    }
}

impl VectorSpace for Vector3 {
    fn zero() -> Self {
        Vector3::zeros()
    }

    fn norm(&self) -> f64 {
        nalgebra::Matrix::norm(self)
    }

    fn cross_norm(&self, rhs: &Self) -> f64 {
        nalgebra::Matrix::norm(&self.cross(rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn planar_cross_norm_is_scalar_cross() {
        let a = Vector2::new(1.0, 0.0);
        let b = Vector2::new(0.0, 2.0);
        assert!((a.cross_norm(&b) - 2.0).abs() < TOL);
        assert!((b.cross_norm(&a) - 2.0).abs() < TOL);
    }

    #[test]
    fn spatial_cross_norm() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 3.0, 4.0);
        assert!((a.cross_norm(&b) - 5.0).abs() < TOL);
    }

    #[test]
    fn scalar_is_one_dimensional() {
        assert!((VectorSpace::norm(&-3.0_f64) - 3.0).abs() < TOL);
        assert!(2.0_f64.cross_norm(&5.0).abs() < TOL);
        assert!((VectorSpace::normalized(&-4.0_f64) + 1.0).abs() < TOL);
    }

    #[test]
    fn perp_rotates_counter_clockwise() {
        let p = Perp::perp(&Vector2::new(1.0, 0.0));
        assert!((p - Vector2::new(0.0, 1.0)).norm() < TOL);
    }

    #[test]
    fn normalized_has_unit_length() {
        let v = VectorSpace::normalized(&Vector2::new(3.0, 4.0));
        assert!((VectorSpace::norm(&v) - 1.0).abs() < TOL);
    }
}
