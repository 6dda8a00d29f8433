use crate::error::{BuilderError, Result};
use crate::geometry::{AssignSegments, CubicSegment, CubicSpline};
use crate::math::VectorSpace;
use crate::operations::query::{AccuracyParams, ArcLength, Localization};

use super::families::{bezier_segments, bspline_segments, catmull_rom_segments, hermite_segments};

/// A cubic spline with arc-length and closest-point queries, as used by an
/// interactive editor.
pub type InteractiveSpline<V> = Localization<ArcLength<CubicSpline<V>>>;

/// Curve family used to turn control points into segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CurveFamily {
    /// Cubic Bezier; every third point is an end point.
    Bezier,
    /// Catmull-Rom; interpolates every point with C1 joints.
    #[default]
    CatmullRom,
    /// Uniform cubic B-spline with reflected end points; C2.
    BSpline,
    /// Cubic Hermite with per-point tangents.
    Hermite,
}

impl CurveFamily {
    /// Builds the segments of this family for `controls`.
    ///
    /// Families other than [`CurveFamily::Hermite`] only read the positions.
    #[must_use]
    pub fn segments<V: VectorSpace>(self, controls: &[ControlPoint<V>]) -> Vec<CubicSegment<V>> {
        let positions = || controls.iter().map(|c| c.position).collect::<Vec<V>>();
        match self {
            Self::Bezier => bezier_segments(&positions()),
            Self::CatmullRom => catmull_rom_segments(&positions()),
            Self::BSpline => bspline_segments(&positions()),
            Self::Hermite => hermite_segments(controls),
        }
    }
}

/// A control point with an optional tangent.
///
/// The tangent is only read by [`CurveFamily::Hermite`]; when absent the
/// Catmull-Rom tangent is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint<V> {
    /// Position the curve is shaped by.
    pub position: V,
    /// Explicit tangent at this point.
    pub tangent: Option<V>,
}

impl<V> ControlPoint<V> {
    /// Creates a control point without a tangent.
    #[must_use]
    pub fn new(position: V) -> Self {
        Self {
            position,
            tangent: None,
        }
    }

    /// Creates a control point with an explicit tangent.
    #[must_use]
    pub fn with_tangent(position: V, tangent: V) -> Self {
        Self {
            position,
            tangent: Some(tangent),
        }
    }
}

impl<V> From<V> for ControlPoint<V> {
    fn from(position: V) -> Self {
        Self::new(position)
    }
}

/// Editable list of control points that keeps a spline in sync with it.
///
/// Every edit rebuilds all segments from the full control list and assigns
/// them to the spline. Edits are atomic: if the index is invalid or the
/// rebuilt segments are rejected, neither the control list nor the spline
/// changes.
///
/// `S` is the spline being maintained, either a plain [`CubicSpline`] or one
/// wrapped in query decorators such as [`InteractiveSpline`].
#[derive(Debug, Clone)]
pub struct SplineBuilder<V, S = CubicSpline<V>> {
    family: CurveFamily,
    controls: Vec<ControlPoint<V>>,
    spline: S,
}

impl<V, S> SplineBuilder<V, S>
where
    V: VectorSpace,
    S: AssignSegments<Segment = CubicSegment<V>>,
{
    /// Creates a builder with no control points and a default spline.
    #[must_use]
    pub fn new(family: CurveFamily) -> Self
    where
        S: Default,
    {
        Self {
            family,
            controls: Vec::new(),
            spline: S::default(),
        }
    }

    /// Creates a builder that maintains `spline`.
    ///
    /// The spline is emptied to match the empty control list.
    ///
    /// # Errors
    ///
    /// Returns an error if the spline rejects the empty segment list.
    pub fn from_spline(family: CurveFamily, mut spline: S) -> Result<Self> {
        spline.assign_segments(Vec::new())?;
        Ok(Self {
            family,
            controls: Vec::new(),
            spline,
        })
    }

    /// Replaces the control points and rebuilds.
    ///
    /// # Errors
    ///
    /// Returns an error if the rebuilt segments do not join up.
    pub fn set_controls<I>(&mut self, controls: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<ControlPoint<V>>,
    {
        let controls = controls.into_iter().map(Into::into).collect();
        self.commit(self.family, controls)
    }

    /// Inserts a control point at `index`, shifting later points.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::IndexOutOfRange`] if `index > len`, or an
    /// error if the rebuilt segments do not join up.
    pub fn insert(&mut self, index: usize, point: impl Into<ControlPoint<V>>) -> Result<()> {
        let len = self.controls.len();
        if index > len {
            return Err(BuilderError::IndexOutOfRange { index, len }.into());
        }
        let mut controls = self.controls.clone();
        controls.insert(index, point.into());
        self.commit(self.family, controls)
    }

    /// Appends a control point.
    ///
    /// # Errors
    ///
    /// Returns an error if the rebuilt segments do not join up.
    pub fn push(&mut self, point: impl Into<ControlPoint<V>>) -> Result<()> {
        self.insert(self.controls.len(), point)
    }

    /// Removes and returns the control point at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::IndexOutOfRange`] if `index >= len`, or an
    /// error if the rebuilt segments do not join up.
    pub fn remove(&mut self, index: usize) -> Result<ControlPoint<V>> {
        let len = self.controls.len();
        if index >= len {
            return Err(BuilderError::IndexOutOfRange { index, len }.into());
        }
        let mut controls = self.controls.clone();
        let removed = controls.remove(index);
        self.commit(self.family, controls)?;
        Ok(removed)
    }

    /// Moves the control point at `index` to `position`, keeping its tangent.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::IndexOutOfRange`] if `index >= len`, or an
    /// error if the rebuilt segments do not join up.
    pub fn change(&mut self, index: usize, position: V) -> Result<()> {
        let mut controls = self.controls.clone();
        let len = controls.len();
        let control = controls
            .get_mut(index)
            .ok_or(BuilderError::IndexOutOfRange { index, len })?;
        control.position = position;
        self.commit(self.family, controls)
    }

    /// Sets or clears the tangent of the control point at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::IndexOutOfRange`] if `index >= len`, or an
    /// error if the rebuilt segments do not join up.
    pub fn change_tangent(&mut self, index: usize, tangent: Option<V>) -> Result<()> {
        let mut controls = self.controls.clone();
        let len = controls.len();
        let control = controls
            .get_mut(index)
            .ok_or(BuilderError::IndexOutOfRange { index, len })?;
        control.tangent = tangent;
        self.commit(self.family, controls)
    }

    /// Switches the curve family and rebuilds.
    ///
    /// # Errors
    ///
    /// Returns an error if the rebuilt segments do not join up.
    pub fn set_family(&mut self, family: CurveFamily) -> Result<()> {
        self.commit(family, self.controls.clone())
    }

    /// Returns the curve family.
    #[must_use]
    pub fn family(&self) -> CurveFamily {
        self.family
    }

    /// Returns the control points in curve order.
    #[must_use]
    pub fn control_points(&self) -> &[ControlPoint<V>] {
        &self.controls
    }

    /// Returns the maintained spline.
    #[must_use]
    pub fn spline(&self) -> &S {
        &self.spline
    }

    /// Returns the maintained spline mutably, e.g. to change query accuracy.
    ///
    /// Segments assigned through this reference are replaced by the next edit.
    pub fn spline_mut(&mut self) -> &mut S {
        &mut self.spline
    }

    /// Unwraps the builder into its spline.
    #[must_use]
    pub fn into_spline(self) -> S {
        self.spline
    }

    fn commit(&mut self, family: CurveFamily, controls: Vec<ControlPoint<V>>) -> Result<()> {
        let segments = family.segments(&controls);
        let count = segments.len();
        self.spline.assign_segments(segments)?;
        tracing::debug!(
            ?family,
            controls = controls.len(),
            segments = count,
            "rebuilt spline from control points"
        );
        self.family = family;
        self.controls = controls;
        Ok(())
    }
}

impl<V: VectorSpace> SplineBuilder<V, InteractiveSpline<V>> {
    /// Creates a builder for an [`InteractiveSpline`] with the given accuracy
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidAccuracy`](crate::error::QueryError::InvalidAccuracy)
    /// if either accuracy is not positive and finite.
    pub fn with_params(family: CurveFamily, params: AccuracyParams) -> Result<Self> {
        params.validate()?;
        let spline = Localization::new(
            ArcLength::new(CubicSpline::empty(), params.parametrization)?,
            params.localization,
        )?;
        Self::from_spline(family, spline)
    }
}
