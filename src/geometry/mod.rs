pub mod curve;
pub mod spline;

pub use curve::{CubicSegment, Curve, CurveDomain, Segment};
pub use spline::{
    AssignSegments, Continuity, CubicSpline, Exact, Piecewise, Spline, Tolerant, ValueOf,
};
