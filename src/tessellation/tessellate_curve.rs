use std::iter::FusedIterator;

use crate::geometry::Curve;
use crate::math::VectorSpace;

/// Uniform sub-intervals evaluated before adaptive refinement starts.
///
/// Comparing only the two ends of `[0, 1]` can miss an S-shaped segment
/// whose midpoint happens to lie on the chord.
const SUBDIVISIONS: usize = 5;

/// Maximum bisection depth within one sub-interval.
const MAX_DEPTH: u32 = 16;

#[derive(Debug, Clone, Copy)]
struct Span<V> {
    t0: f64,
    t1: f64,
    p0: V,
    p1: V,
    depth: u32,
}

/// Adaptive polyline approximation of a single curve.
///
/// `[0, 1]` is first split into five uniform sub-intervals. Each one is
/// bisected while the curve midpoint lies at least `accuracy` away from the
/// chord midpoint; an accepted interval yields its left end. The end point
/// `evaluate(1)` is yielded last. Bisection stops at a fixed depth, so the
/// sequence is finite for any accuracy, including zero or NaN.
///
/// The iterator is lazy and can be cloned to restart from the current
/// position; calling [`Curve::approximate`] again starts from the beginning.
pub struct Approximate<'a, C: Curve> {
    curve: &'a C,
    accuracy: f64,
    next_division: usize,
    pending: Vec<Span<C::Value>>,
    finished: bool,
}

impl<'a, C: Curve> Approximate<'a, C> {
    /// Starts approximating `curve` within `accuracy`.
    #[must_use]
    pub fn new(curve: &'a C, accuracy: f64) -> Self {
        Self {
            curve,
            accuracy,
            next_division: 0,
            pending: Vec::new(),
            finished: false,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn push_division(&mut self, i: usize) {
        let t0 = i as f64 / SUBDIVISIONS as f64;
        let t1 = (i + 1) as f64 / SUBDIVISIONS as f64;
        self.pending.push(Span {
            t0,
            t1,
            p0: self.curve.evaluate(t0),
            p1: self.curve.evaluate(t1),
            depth: 0,
        });
    }
}

impl<C: Curve> Clone for Approximate<'_, C> {
    fn clone(&self) -> Self {
        Self {
            curve: self.curve,
            accuracy: self.accuracy,
            next_division: self.next_division,
            pending: self.pending.clone(),
            finished: self.finished,
        }
    }
}

impl<C: Curve> Iterator for Approximate<'_, C> {
    type Item = C::Value;

    fn next(&mut self) -> Option<C::Value> {
        loop {
            if let Some(span) = self.pending.pop() {
                let t = (span.t0 + span.t1) / 2.0;
                let p = self.curve.evaluate(t);
                let chord_mid = (span.p0 + span.p1) / 2.0;

                if (p - chord_mid).norm() < self.accuracy {
                    return Some(span.p0);
                }
                if span.depth >= MAX_DEPTH {
                    tracing::trace!(t0 = span.t0, t1 = span.t1, "flattening depth limit reached");
                    return Some(span.p0);
                }

                // Right half first so the left half is popped next.
                self.pending.push(Span {
                    t0: t,
                    t1: span.t1,
                    p0: p,
                    p1: span.p1,
                    depth: span.depth + 1,
                });
                self.pending.push(Span {
                    t0: span.t0,
                    t1: t,
                    p0: span.p0,
                    p1: p,
                    depth: span.depth + 1,
                });
                continue;
            }

            if self.next_division < SUBDIVISIONS {
                self.push_division(self.next_division);
                self.next_division += 1;
                continue;
            }

            if self.finished {
                return None;
            }
            self.finished = true;
            return Some(self.curve.evaluate(1.0));
        }
    }
}

impl<C: Curve> FusedIterator for Approximate<'_, C> {}

/// Concatenated approximations of consecutive segments.
///
/// Each segment contributes its own end point, so interior joints appear
/// twice: once as the end of one segment and once as the start of the next.
pub struct SplineApproximate<'a, S: Curve> {
    segments: std::slice::Iter<'a, S>,
    current: Option<Approximate<'a, S>>,
    accuracy: f64,
}

impl<'a, S: Curve> SplineApproximate<'a, S> {
    /// Starts approximating `segments` within `accuracy`.
    #[must_use]
    pub fn new(segments: &'a [S], accuracy: f64) -> Self {
        Self {
            segments: segments.iter(),
            current: None,
            accuracy,
        }
    }
}

impl<S: Curve> Clone for SplineApproximate<'_, S> {
    fn clone(&self) -> Self {
        Self {
            segments: self.segments.clone(),
            current: self.current.clone(),
            accuracy: self.accuracy,
        }
    }
}

impl<S: Curve> Iterator for SplineApproximate<'_, S> {
    type Item = S::Value;

    fn next(&mut self) -> Option<S::Value> {
        loop {
            if let Some(point) = self.current.as_mut().and_then(Iterator::next) {
                return Some(point);
            }
            let segment = self.segments.next()?;
            self.current = Some(Approximate::new(segment, self.accuracy));
        }
    }
}

impl<S: Curve> FusedIterator for SplineApproximate<'_, S> {}
