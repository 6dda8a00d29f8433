pub mod numeric;
pub mod vector;

pub use numeric::{binomial, factorial, falling_factorial, golden_section};
pub use vector::{Perp, VectorSpace};

/// 2D vector type, the usual value type of planar splines.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Magnitude below which a derivative is treated as vanishing.
pub const DEGENERACY_THRESHOLD: f64 = 1e-8;

/// Epsilon used by the default continuity check between adjacent segments.
pub const CONTINUITY_EPSILON: f64 = 1e-9;
