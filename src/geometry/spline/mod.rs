mod continuity;

pub use continuity::{Continuity, Exact, Tolerant};

use std::marker::PhantomData;

use crate::error::{Result, SplineError};
use crate::math::Perp;
use crate::tessellation::SplineApproximate;

use super::curve::{CubicSegment, Curve, CurveDomain};

/// The value type produced by a piecewise curve.
pub type ValueOf<P> = <<P as Piecewise>::Segment as Curve>::Value;

/// A spline of cubic segments with the default continuity check.
pub type CubicSpline<V> = Spline<CubicSegment<V>>;

/// Query surface of a curve made of consecutive segments.
///
/// The global parameter runs over `[0, N]` for `N` segments. Segment `i`
/// covers `[i, i + 1]`; parameters outside the domain are clamped to the
/// first or last segment. Every per-point query resolves the segment and
/// delegates to it.
pub trait Piecewise {
    /// The segment type.
    type Segment: Curve;

    /// The segments in curve order.
    fn segments(&self) -> &[Self::Segment];

    /// Number of segments.
    fn segment_count(&self) -> usize {
        self.segments().len()
    }

    /// Returns the global parameter domain `[0, N]`.
    fn domain(&self) -> CurveDomain {
        #[allow(clippy::cast_precision_loss)]
        let t_max = self.segment_count() as f64;
        CurveDomain::new(0.0, t_max)
    }

    /// Maps a global parameter to a segment index and local parameter.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] if there are no segments.
    fn locate(&self, t: f64) -> Result<(usize, f64)> {
        let count = self.segment_count();
        if count == 0 {
            return Err(SplineError::Empty.into());
        }
        if t.is_nan() || t <= 0.0 {
            return Ok((0, 0.0));
        }
        #[allow(clippy::cast_precision_loss)]
        let t_max = count as f64;
        if t >= t_max {
            return Ok((count - 1, 1.0));
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let index = (t.floor() as usize).min(count - 1);
        #[allow(clippy::cast_precision_loss)]
        let local = t - index as f64;
        Ok((index, local))
    }

    /// Runs `query` on the segment that owns global parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] if there are no segments.
    fn at<R, F>(&self, t: f64, query: F) -> Result<R>
    where
        F: FnOnce(&Self::Segment, f64) -> R,
    {
        let (index, local) = self.locate(t)?;
        Ok(query(&self.segments()[index], local))
    }

    /// Evaluates the spline at global parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] if there are no segments.
    fn evaluate(&self, t: f64) -> Result<ValueOf<Self>> {
        self.at(t, |segment, local| segment.evaluate(local))
    }

    /// Evaluates the `order`-th derivative at global parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] if there are no segments.
    fn derivative(&self, order: usize, t: f64) -> Result<ValueOf<Self>> {
        self.at(t, |segment, local| segment.derivative(order, local))
    }

    /// Curvature at global parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] if there are no segments.
    fn curvature(&self, t: f64) -> Result<f64> {
        self.at(t, |segment, local| segment.curvature(local))
    }

    /// Radius of curvature at global parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] if there are no segments.
    fn radius(&self, t: f64) -> Result<f64> {
        self.at(t, |segment, local| segment.radius(local))
    }

    /// Torsion at global parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] if there are no segments, otherwise
    /// the segment's unsupported-torsion error.
    fn torsion(&self, t: f64) -> Result<f64> {
        self.at(t, |segment, local| segment.torsion(local))?
    }

    /// Torsion radius at global parameter `t`.
    ///
    /// # Errors
    ///
    /// Same as [`Piecewise::torsion`].
    fn torsion_radius(&self, t: f64) -> Result<f64> {
        self.at(t, |segment, local| segment.torsion_radius(local))?
    }

    /// Unit tangent direction at global parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] if there are no segments.
    fn direction(&self, t: f64) -> Result<ValueOf<Self>> {
        self.at(t, |segment, local| segment.direction(local))
    }

    /// Unit normal at global parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] if there are no segments.
    fn normal(&self, t: f64) -> Result<ValueOf<Self>>
    where
        ValueOf<Self>: Perp,
    {
        self.at(t, |segment, local| segment.normal(local))
    }

    /// Binormal at global parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] if there are no segments.
    fn binormal(&self, t: f64) -> Result<ValueOf<Self>>
    where
        ValueOf<Self>: Perp,
    {
        self.at(t, |segment, local| segment.binormal(local))
    }

    /// Lazily flattens every segment, in order, into polyline vertices.
    fn approximate(&self, accuracy: f64) -> SplineApproximate<'_, Self::Segment> {
        SplineApproximate::new(self.segments(), accuracy)
    }
}

/// Wholesale replacement of a piecewise curve's segments.
pub trait AssignSegments: Piecewise {
    /// Replaces all segments after verifying continuity.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Disconnected`] and leaves the current segments
    /// untouched if the new segments do not join up.
    fn assign_segments(&mut self, segments: Vec<Self::Segment>) -> Result<()>;
}

/// An ordered sequence of segments whose ends join up.
///
/// Invariant: `segments[i].ending()` equals `segments[i + 1].origin()` as
/// judged by the continuity policy `C`. Every mutation builds a candidate
/// sequence and only swaps it in after the check passes.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline<S, C = Tolerant> {
    segments: Vec<S>,
    continuity: PhantomData<C>,
}

impl<S, C> Default for Spline<S, C> {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            continuity: PhantomData,
        }
    }
}

impl<S, C> Spline<S, C>
where
    S: Curve,
    C: Continuity<S::Value>,
{
    /// Creates a spline from segments.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Disconnected`] if adjacent segments do not join.
    pub fn new(segments: Vec<S>) -> Result<Self> {
        verify::<S, C>(&segments)?;
        Ok(Self {
            segments,
            continuity: PhantomData,
        })
    }

    /// Creates a spline with no segments.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns whether the spline has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the segment at `index`, if any.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&S> {
        self.segments.get(index)
    }

    /// Iterates over the segments in curve order.
    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.segments.iter()
    }

    /// Replaces all segments.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Disconnected`] and leaves the spline unchanged
    /// if the new segments do not join up.
    pub fn assign(&mut self, segments: Vec<S>) -> Result<()> {
        let candidate = Self::new(segments)?;
        tracing::debug!(segments = candidate.len(), "assigned spline segments");
        *self = candidate;
        Ok(())
    }

    /// Replaces the segments in `from..to` with `segments`.
    ///
    /// Continuity is re-verified over the whole resulting sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::InvalidRange`] if the range does not lie within
    /// the spline, or [`SplineError::Disconnected`] if the result does not
    /// join up. The spline is unchanged on error.
    pub fn replace(&mut self, from: usize, to: usize, segments: Vec<S>) -> Result<()>
    where
        S: Clone,
    {
        let len = self.segments.len();
        if from > to || to > len {
            return Err(SplineError::InvalidRange { from, to, len }.into());
        }
        let mut candidate = self.segments.clone();
        candidate.splice(from..to, segments);
        verify::<S, C>(&candidate)?;
        tracing::debug!(from, to, segments = candidate.len(), "replaced spline segments");
        self.segments = candidate;
        Ok(())
    }

    /// Removes all segments.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Exchanges the segments of two splines.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.segments, &mut other.segments);
    }
}

impl<S: Curve, C> Piecewise for Spline<S, C> {
    type Segment = S;

    fn segments(&self) -> &[S] {
        &self.segments
    }
}

impl<S, C> AssignSegments for Spline<S, C>
where
    S: Curve,
    C: Continuity<S::Value>,
{
    fn assign_segments(&mut self, segments: Vec<S>) -> Result<()> {
        self.assign(segments)
    }
}

impl<'a, S, C> IntoIterator for &'a Spline<S, C> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Checks that each segment ends where the next one starts.
fn verify<S, C>(segments: &[S]) -> std::result::Result<(), SplineError>
where
    S: Curve,
    C: Continuity<S::Value>,
{
    for (index, pair) in segments.windows(2).enumerate() {
        if !C::connected(&pair[0].ending(), &pair[1].origin()) {
            tracing::warn!(index, "rejected disconnected spline segments");
            return Err(SplineError::Disconnected { index });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PolysplineError;
    use crate::geometry::curve::Segment;
    use crate::math::Vector2;

    const TOL: f64 = 1e-12;

    fn line(from: (f64, f64), to: (f64, f64)) -> CubicSegment<Vector2> {
        let a = Vector2::new(from.0, from.1);
        let b = Vector2::new(to.0, to.1);
        Segment::new([a, b - a, Vector2::zeros(), Vector2::zeros()])
    }

    fn staircase() -> CubicSpline<Vector2> {
        Spline::new(vec![
            line((0.0, 0.0), (1.0, 0.0)),
            line((1.0, 0.0), (1.0, 1.0)),
            line((1.0, 1.0), (2.0, 1.0)),
        ])
        .unwrap()
    }

    #[test]
    fn new_rejects_disconnected_segments() {
        let result = CubicSpline::new(vec![
            line((0.0, 0.0), (1.0, 0.0)),
            line((1.0, 0.5), (2.0, 0.0)),
        ]);
        assert!(matches!(
            result,
            Err(PolysplineError::Spline(SplineError::Disconnected { index: 0 }))
        ));
    }

    #[test]
    fn global_parameter_selects_segment() {
        let s = staircase();
        assert!((s.evaluate(0.5).unwrap() - Vector2::new(0.5, 0.0)).norm() < TOL);
        assert!((s.evaluate(1.5).unwrap() - Vector2::new(1.0, 0.5)).norm() < TOL);
        assert!((s.evaluate(2.25).unwrap() - Vector2::new(1.25, 1.0)).norm() < TOL);
    }

    #[test]
    fn parameter_is_clamped() {
        let s = staircase();
        assert_eq!(s.locate(-3.0).unwrap(), (0, 0.0));
        assert_eq!(s.locate(7.0).unwrap(), (2, 1.0));
        assert_eq!(s.locate(3.0).unwrap(), (2, 1.0));
        assert_eq!(s.locate(f64::NAN).unwrap(), (0, 0.0));
        assert!((s.evaluate(-1.0).unwrap() - Vector2::new(0.0, 0.0)).norm() < TOL);
        assert!((s.evaluate(10.0).unwrap() - Vector2::new(2.0, 1.0)).norm() < TOL);
    }

    #[test]
    fn integer_parameter_starts_next_segment() {
        let s = staircase();
        assert_eq!(s.locate(1.0).unwrap(), (1, 0.0));
        assert!((s.direction(1.0).unwrap() - Vector2::new(0.0, 1.0)).norm() < TOL);
    }

    #[test]
    fn empty_spline_queries_fail() {
        let s = CubicSpline::<Vector2>::empty();
        assert!(s.is_empty());
        assert!(matches!(
            s.evaluate(0.0),
            Err(PolysplineError::Spline(SplineError::Empty))
        ));
        assert!(s.derivative(1, 0.0).is_err());
        assert!(s.curvature(0.0).is_err());
        assert!(s.normal(0.0).is_err());
    }

    #[test]
    fn assign_failure_keeps_previous_segments() {
        let mut s = staircase();
        let before = s.clone();
        let result = s.assign(vec![line((0.0, 0.0), (1.0, 0.0)), line((5.0, 5.0), (6.0, 6.0))]);
        assert!(result.is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn replace_splices_segments() {
        let mut s = staircase();
        s.replace(
            1,
            2,
            vec![line((1.0, 0.0), (1.0, 0.5)), line((1.0, 0.5), (1.0, 1.0))],
        )
        .unwrap();
        assert_eq!(s.len(), 4);
        assert!((s.evaluate(2.0).unwrap() - Vector2::new(1.0, 0.5)).norm() < TOL);
    }

    #[test]
    fn replace_rejects_broken_joint() {
        let mut s = staircase();
        let before = s.clone();
        let result = s.replace(1, 2, vec![line((1.0, 0.0), (3.0, 3.0))]);
        assert!(matches!(
            result,
            Err(PolysplineError::Spline(SplineError::Disconnected { index: 1 }))
        ));
        assert_eq!(s, before);
    }

    #[test]
    fn replace_rejects_invalid_range() {
        let mut s = staircase();
        assert!(matches!(
            s.replace(2, 5, vec![]),
            Err(PolysplineError::Spline(SplineError::InvalidRange { .. }))
        ));
    }

    #[test]
    fn exact_policy_rejects_noise() {
        let a = line((0.0, 0.0), (0.1 + 0.2, 0.0));
        let b = line((0.3, 0.0), (1.0, 0.0));
        assert!(Spline::<_, Exact>::new(vec![a, b]).is_err());
        assert!(Spline::<_, Tolerant>::new(vec![a, b]).is_ok());
    }

    #[test]
    fn swap_and_clear() {
        let mut a = staircase();
        let mut b = CubicSpline::empty();
        a.swap(&mut b);
        assert!(a.is_empty());
        assert_eq!(b.len(), 3);
        b.clear();
        assert!(b.is_empty());
    }

    #[test]
    fn domain_spans_segment_count() {
        let d = staircase().domain();
        assert!((d.t_max - 3.0).abs() < TOL);
    }

    #[test]
    fn torsion_propagates_unsupported() {
        assert!(staircase().torsion(0.5).is_err());
        assert!(staircase().torsion_radius(0.5).is_err());
    }
}
