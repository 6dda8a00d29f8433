use thiserror::Error;

/// Top-level error type for the polyspline library.
#[derive(Debug, Error)]
pub enum PolysplineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Spline(#[from] SplineError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Builder(#[from] BuilderError),
}

/// Errors related to single-segment geometry.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("segment needs {expected} coefficients, got {actual}")]
    CoefficientCount { expected: usize, actual: usize },

    #[error("{0} is not supported")]
    Unsupported(&'static str),
}

/// Errors related to the segment sequence of a spline.
#[derive(Debug, Error, PartialEq)]
pub enum SplineError {
    #[error("spline segments are disconnected: segment {index} does not end where segment {} starts", .index + 1)]
    Disconnected { index: usize },

    #[error("spline has no segments")]
    Empty,

    #[error("segment range {from}..{to} is invalid for a spline of {len} segments")]
    InvalidRange { from: usize, to: usize, len: usize },
}

/// Errors related to arc-length and localization queries.
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("accuracy must be positive and finite, got {0}")]
    InvalidAccuracy(f64),

    #[error("arc length {s} is outside [0, {length}]")]
    OutOfRange { s: f64, length: f64 },

    #[error("arc-length inversion for s = {s} did not converge (residual {residual})")]
    NotConverged { s: f64, residual: f64 },
}

/// Errors related to control-point editing.
#[derive(Debug, Error, PartialEq)]
pub enum BuilderError {
    #[error("control point index {index} is out of range for {len} control points")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Convenience type alias for results using [`PolysplineError`].
pub type Result<T> = std::result::Result<T, PolysplineError>;
