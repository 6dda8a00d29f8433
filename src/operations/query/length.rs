use std::ops::{Deref, DerefMut};

use crate::error::{QueryError, Result, SplineError};
use crate::geometry::{AssignSegments, Curve, Piecewise};
use crate::math::VectorSpace;

use super::{validate_accuracy, AccuracyParams};

/// Maximum bisection depth of the adaptive quadrature.
const MAX_QUADRATURE_DEPTH: u32 = 16;

/// Maximum steps of the inverse arc-length search.
///
/// The parameter step halves every iteration, so this covers the full
/// `f64` mantissa.
const MAX_SEARCH_STEPS: usize = 64;

/// Arc-length queries on a single segment, `arclen(a, b) = integral |p'(t)| dt`.
///
/// Implemented for every [`Curve`]; `accuracy` bounds the error of each
/// adaptive estimate.
pub trait SegmentArcLength: Curve {
    /// Arc length of the part of the curve between parameters `from` and `to`.
    ///
    /// Adaptive quadrature: compare the chord with the two-chord estimate
    /// through the midpoint. Once they agree within `accuracy`, refine to four
    /// chords and, if those agree as well, return the Richardson-extrapolated
    /// value; otherwise split the interval in half.
    fn length_between(&self, from: f64, to: f64, accuracy: f64) -> f64 {
        quadrature(self, from, to, accuracy, 0)
    }

    /// Arc length of the whole segment.
    fn length(&self, accuracy: f64) -> f64 {
        let domain = self.domain();
        self.length_between(domain.t_min, domain.t_max, accuracy)
    }

    /// Converts a parameter to arc length, clamping `t` to the domain.
    fn t2s(&self, t: f64, accuracy: f64) -> f64 {
        let domain = self.domain();
        self.length_between(domain.t_min, t.clamp(domain.t_min, domain.t_max), accuracy)
    }

    /// Converts arc length back to a parameter in the segment's domain.
    ///
    /// Bisection-style search from the end of the domain with a halving step, stopping once
    /// `|t2s(t) - s| < accuracy`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::OutOfRange`] if `s` lies outside the segment's
    /// length by more than `accuracy`, and [`QueryError::NotConverged`] if
    /// the search ends with a residual of `accuracy` or more.
    fn s2t(&self, s: f64, accuracy: f64) -> Result<f64> {
        self.s2t_within(s, self.length(accuracy), accuracy)
    }

    /// Same as [`SegmentArcLength::s2t`] for a caller that has already
    /// measured the segment.
    ///
    /// `length` must be `self.length(accuracy)`; `s` is range-checked against
    /// it, so a caller that picked this segment by that length never gets
    /// an out-of-range error for it.
    ///
    /// # Errors
    ///
    /// Same as [`SegmentArcLength::s2t`].
    fn s2t_within(&self, s: f64, length: f64, accuracy: f64) -> Result<f64> {
        if s.is_nan() || s < -accuracy || s > length + accuracy {
            return Err(QueryError::OutOfRange { s, length }.into());
        }

        let domain = self.domain();
        let mut t = domain.t_max;
        let mut step = domain.t_max - domain.t_min;
        for _ in 0..MAX_SEARCH_STEPS {
            let d = self.t2s(t, accuracy) - s;
            if d.abs() < accuracy {
                return Ok(t);
            }
            t += if d < 0.0 { step } else { -step };
            step /= 2.0;
            if !(domain.t_min..=domain.t_max).contains(&t) {
                break;
            }
        }

        let t = t.clamp(domain.t_min, domain.t_max);
        let residual = (self.t2s(t, accuracy) - s).abs();
        if residual < accuracy {
            Ok(t)
        } else {
            tracing::warn!(s, t, residual, accuracy, "arc-length inversion did not converge");
            Err(QueryError::NotConverged { s, residual }.into())
        }
    }
}

impl<C: Curve + ?Sized> SegmentArcLength for C {}

fn quadrature<C: Curve + ?Sized>(curve: &C, from: f64, to: f64, accuracy: f64, depth: u32) -> f64 {
    let c = (from + to) / 2.0;

    let p0 = curve.evaluate(from);
    let p1 = curve.evaluate(c);
    let p2 = curve.evaluate(to);

    let l0 = (p0 - p2).norm();
    let l1 = (p0 - p1).norm() + (p1 - p2).norm();

    let at_limit = depth >= MAX_QUADRATURE_DEPTH;
    if l1 - l0 < accuracy || at_limit {
        let p01 = curve.evaluate((from + c) / 2.0);
        let p12 = curve.evaluate((c + to) / 2.0);
        let l2 = (p0 - p01).norm() + (p01 - p1).norm() + (p1 - p12).norm() + (p12 - p2).norm();
        let estimate = (16.0 * l2 - l1) / 15.0;

        if l2 - l0 < accuracy {
            return estimate;
        }
        if at_limit {
            tracing::trace!(from, to, "arc-length quadrature depth limit reached");
            return estimate;
        }
    }

    quadrature(curve, from, c, accuracy, depth + 1) + quadrature(curve, c, to, accuracy, depth + 1)
}

/// Arc-length parametrization of a piecewise curve.
///
/// Wraps a spline (or another decorator around one) and adds length and
/// `t <-> s` conversion at a configurable accuracy. All other queries reach
/// the wrapped curve through [`Piecewise`] or by dereferencing.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLength<P> {
    inner: P,
    accuracy: f64,
}

impl<P> ArcLength<P> {
    /// Wraps `inner` with the given parametrization accuracy.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidAccuracy`] if `accuracy` is not positive
    /// and finite.
    pub fn new(inner: P, accuracy: f64) -> Result<Self> {
        let accuracy = validate_accuracy(accuracy)?;
        Ok(Self { inner, accuracy })
    }

    /// Returns the parametrization accuracy.
    #[must_use]
    pub fn parametrization_accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Sets the parametrization accuracy.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidAccuracy`] and keeps the current value if
    /// `accuracy` is not positive and finite.
    pub fn set_parametrization_accuracy(&mut self, accuracy: f64) -> Result<()> {
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

impl<P: Piecewise> ArcLength<P> {
    /// Total arc length of the curve.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] if there are no segments.
    pub fn length(&self) -> Result<f64> {
        self.t2s(self.inner.domain().t_max)
    }

    /// Converts a global parameter to arc length.
    ///
    /// Every segment is measured at `accuracy / N`, so the errors of all
    /// segments add up to at most one accuracy unit.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] if there are no segments.
    pub fn t2s(&self, t: f64) -> Result<f64> {
        let (index, local) = self.inner.locate(t)?;
        let segments = self.inner.segments();
        let per_segment = self.per_segment_accuracy();
        let preceding: f64 = segments[..index]
            .iter()
            .map(|segment| segment.length(per_segment))
            .sum();
        Ok(preceding + segments[index].t2s(local, per_segment))
    }

    /// Converts arc length to a global parameter in `[0, N]`.
    ///
    /// Segments are measured at the same per-segment accuracy as in
    /// [`ArcLength::t2s`], and the segment holding `s` is searched against
    /// that same measurement, so `s2t(t2s(t))` recovers `t` up to the search
    /// tolerance, joints included.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] if there are no segments,
    /// [`QueryError::OutOfRange`] if `s` is negative or exceeds the total
    /// length by more than the accuracy, and [`QueryError::NotConverged`] if
    /// the search within the target segment fails.
    pub fn s2t(&self, s: f64) -> Result<f64> {
        let segments = self.inner.segments();
        if segments.is_empty() {
            return Err(SplineError::Empty.into());
        }
        if s.is_nan() || s < -self.accuracy {
            return Err(QueryError::OutOfRange {
                s,
                length: self.length()?,
            }
            .into());
        }

        let per_segment = self.per_segment_accuracy();
        let mut remaining = s.max(0.0);
        let mut measured = 0.0;
        for (index, segment) in segments.iter().enumerate() {
            let segment_length = segment.length(per_segment);
            if remaining > segment_length {
                remaining -= segment_length;
                measured += segment_length;
                continue;
            }
            #[allow(clippy::cast_precision_loss)]
            let offset = index as f64;
            return Ok(offset + segment.s2t_within(remaining, segment_length, per_segment)?);
        }

        if remaining <= self.accuracy {
            return Ok(self.inner.domain().t_max);
        }
        Err(QueryError::OutOfRange { s, length: measured }.into())
    }

    #[allow(clippy::cast_precision_loss)]
    fn per_segment_accuracy(&self) -> f64 {
        self.accuracy / self.inner.segment_count().max(1) as f64
    }
}

impl<P: Default> Default for ArcLength<P> {
    fn default() -> Self {
        Self {
            inner: P::default(),
            accuracy: AccuracyParams::default().parametrization,
        }
    }
}

impl<P: Piecewise> Piecewise for ArcLength<P> {
    type Segment = P::Segment;

    fn segments(&self) -> &[P::Segment] {
        self.inner.segments()
    }
}

impl<P: AssignSegments> AssignSegments for ArcLength<P> {
    fn assign_segments(&mut self, segments: Vec<P::Segment>) -> Result<()> {
        self.inner.assign_segments(segments)
    }
}

impl<P> Deref for ArcLength<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.inner
    }
}

impl<P> DerefMut for ArcLength<P> {
    fn deref_mut(&mut self) -> &mut P {
        &mut self.inner
    }
}
