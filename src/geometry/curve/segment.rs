use crate::error::{GeometryError, Result};
use crate::math::{falling_factorial, VectorSpace};

use super::Curve;

/// A polynomial curve piece in power basis.
///
/// `N` is the number of coefficients, so the degree is `N - 1`:
///
/// `P(t) = c[0] + c[1] * t + ... + c[N-1] * t^(N-1)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<V, const N: usize> {
    coefs: [V; N],
}

/// A cubic segment, the piece type produced by every curve builder.
pub type CubicSegment<V> = Segment<V, 4>;

impl<V: VectorSpace, const N: usize> Segment<V, N> {
    /// Creates a segment from its power-basis coefficients.
    #[must_use]
    pub fn new(coefs: [V; N]) -> Self {
        Self { coefs }
    }

    /// Creates a segment from a coefficient slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice does not hold exactly `N` coefficients.
    pub fn from_slice(coefs: &[V]) -> Result<Self> {
        <[V; N]>::try_from(coefs).map(Self::new).map_err(|_| {
            GeometryError::CoefficientCount {
                expected: N,
                actual: coefs.len(),
            }
            .into()
        })
    }

    /// Returns the power-basis coefficients, lowest order first.
    #[must_use]
    pub fn coefficients(&self) -> &[V; N] {
        &self.coefs
    }
}

impl<V: VectorSpace, const N: usize> Default for Segment<V, N> {
    fn default() -> Self {
        Self {
            coefs: [V::zero(); N],
        }
    }
}

impl<V: VectorSpace, const N: usize> Curve for Segment<V, N> {
    type Value = V;

    fn degree(&self) -> usize {
        N.saturating_sub(1)
    }

    fn evaluate(&self, t: f64) -> V {
        self.coefs
            .iter()
            .rev()
            .fold(V::zero(), |acc, &c| acc * t + c)
    }

    // d^k/dt^k sum(c[i] t^i) = sum_{i>=k} i!/(i-k)! * c[i] * t^(i-k)
    fn derivative(&self, order: usize, t: f64) -> V {
        self.coefs
            .iter()
            .enumerate()
            .skip(order)
            .rev()
            .fold(V::zero(), |acc, (i, &c)| {
                acc * t + c * falling_factorial(i, order)
            })
    }

    fn origin(&self) -> V {
        self.coefs.first().copied().unwrap_or_else(V::zero)
    }

    fn ending(&self) -> V {
        self.coefs.iter().fold(V::zero(), |acc, &c| acc + c)
    }
}
