use crate::math::{VectorSpace, CONTINUITY_EPSILON};

/// Decides whether one segment's end joins the next segment's start.
pub trait Continuity<V> {
    /// Returns `true` if `ending` and `origin` are the same point.
    fn connected(ending: &V, origin: &V) -> bool;
}

/// Joints must match bit for bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exact;

impl<V: PartialEq> Continuity<V> for Exact {
    fn connected(ending: &V, origin: &V) -> bool {
        ending == origin
    }
}

/// Joints may differ by floating-point noise, absolute or relative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tolerant;

impl<V: VectorSpace> Continuity<V> for Tolerant {
    fn connected(ending: &V, origin: &V) -> bool {
        ending.relative_eq(origin, CONTINUITY_EPSILON, CONTINUITY_EPSILON)
    }
}
