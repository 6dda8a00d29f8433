use std::ops::{Deref, DerefMut};

use crate::error::{Result, SplineError};
use crate::geometry::{AssignSegments, Curve, Piecewise, ValueOf};
use crate::math::{golden_section, VectorSpace};

use super::{validate_accuracy, AccuracyParams};

/// Result of a closest point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint<V> {
    /// The closest point on the curve.
    pub point: V,
    /// The parameter value at the closest point.
    pub parameter: f64,
    /// The distance from the query point to the closest point.
    pub distance: f64,
}

/// Nearest-point queries on a single segment.
///
/// The search is a golden-section minimization of `|point - p(t)|` over
/// the segment's [`Curve::domain`]. It assumes the distance is unimodal on the segment; for loops
/// or sharp bends a local minimum may be returned.
pub trait SegmentLocalization: Curve {
    /// Finds the point of the segment closest to `point`.
    ///
    /// `accuracy` is the width of the final parameter bracket.
    fn closest_point(&self, point: &Self::Value, accuracy: f64) -> ClosestPoint<Self::Value> {
        let domain = self.domain();
        let parameter = golden_section(domain.t_min, domain.t_max, accuracy, |t| {
            (*point - self.evaluate(t)).norm()
        });
        let closest = self.evaluate(parameter);
        ClosestPoint {
            point: closest,
            parameter,
            distance: (*point - closest).norm(),
        }
    }

    /// Returns `(t, distance)` of the point of the segment closest to `point`.
    fn distance(&self, point: &Self::Value, accuracy: f64) -> (f64, f64) {
        let result = self.closest_point(point, accuracy);
        (result.parameter, result.distance)
    }
}

impl<C: Curve + ?Sized> SegmentLocalization for C {}

/// Nearest-point queries on a piecewise curve.
///
/// Every segment is searched and the overall minimum wins; on equal
/// distances the earlier segment is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Localization<P> {
    inner: P,
    accuracy: f64,
}

impl<P> Localization<P> {
    /// Wraps `inner` with the given localization accuracy.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidAccuracy`](crate::error::QueryError::InvalidAccuracy)
    /// if `accuracy` is not positive and finite.
    pub fn new(inner: P, accuracy: f64) -> Result<Self> {
        let accuracy = validate_accuracy(accuracy)?;
        Ok(Self { inner, accuracy })
    }

    /// Returns the localization accuracy.
    #[must_use]
    pub fn localization_accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Sets the localization accuracy.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidAccuracy`](crate::error::QueryError::InvalidAccuracy)
    /// and keeps the current value if `accuracy` is not positive and finite.
    pub fn set_localization_accuracy(&mut self, accuracy: f64) -> Result<()> {
        self.accuracy = validate_accuracy(accuracy)?;
        Ok(())
    }

    /// Returns the wrapped curve.
    #[must_use]
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Unwraps the decorator.
    #[must_use]
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Piecewise> Localization<P> {
    /// Finds the point of the curve closest to `point`.
    ///
    /// The returned parameter is global, in `[0, N]`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] if there are no segments.
    pub fn closest_point(&self, point: &ValueOf<P>) -> Result<ClosestPoint<ValueOf<P>>> {
        let mut best: Option<ClosestPoint<ValueOf<P>>> = None;
        for (index, segment) in self.inner.segments().iter().enumerate() {
            let candidate = segment.closest_point(point, self.accuracy);
            if best.is_none_or(|b| candidate.distance < b.distance) {
                #[allow(clippy::cast_precision_loss)]
                let offset = index as f64;
                best = Some(ClosestPoint {
                    parameter: offset + candidate.parameter,
                    ..candidate
                });
            }
        }
        best.ok_or_else(|| SplineError::Empty.into())
    }

    /// Returns `(t, distance)` of the point of the curve closest to `point`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] if there are no segments.
    pub fn distance(&self, point: &ValueOf<P>) -> Result<(f64, f64)> {
        let result = self.closest_point(point)?;
        Ok((result.parameter, result.distance))
    }
}

impl<P: Default> Default for Localization<P> {
    fn default() -> Self {
        Self {
            inner: P::default(),
            accuracy: AccuracyParams::default().localization,
        }
    }
}

impl<P: Piecewise> Piecewise for Localization<P> {
    type Segment = P::Segment;

    fn segments(&self) -> &[P::Segment] {
        self.inner.segments()
    }
}

impl<P: AssignSegments> AssignSegments for Localization<P> {
    fn assign_segments(&mut self, segments: Vec<P::Segment>) -> Result<()> {
        self.inner.assign_segments(segments)
    }
}

impl<P> Deref for Localization<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.inner
    }
}

impl<P> DerefMut for Localization<P> {
    fn deref_mut(&mut self) -> &mut P {
        &mut self.inner
    }
}
