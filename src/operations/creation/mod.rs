//! Curve builders: control points in, cubic segments out.

mod basis;
mod builder;
mod families;

pub use basis::{bezier_n_segment, bezier_segment, bspline_segment, hermite_segment};
pub use builder::{ControlPoint, CurveFamily, InteractiveSpline, SplineBuilder};
pub use families::{
    bezier_n_segments, bezier_segments, bspline_segments, catmull_rom_segments, hermite_segments,
};
