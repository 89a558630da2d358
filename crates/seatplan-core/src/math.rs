//! Closed-interval arithmetic and small numeric helpers.
//!
//! Every entity on the canvas projects onto one interval per axis, so the
//! overlap rules for rectangles reduce to the rules below applied twice.

use serde::{Deserialize, Serialize};

/// A closed interval `[min, max]` with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Creates an interval from two endpoints in either order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Length of the interval.
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the interval.
    pub fn midpoint(&self) -> f64 {
        average(&[self.min, self.max])
    }

    /// Smallest interval containing both `self` and `other`.
    pub fn hull(&self, other: &Interval) -> Interval {
        Interval {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl From<(f64, f64)> for Interval {
    fn from((a, b): (f64, f64)) -> Self {
        Self::new(a, b)
    }
}

/// Intersection of two intervals: `[max(mins), min(maxs)]`.
///
/// The result is meaningless (`min > max`) when the inputs are disjoint, so
/// callers check [`is_disjoint`] first.
pub fn intersection(a: Interval, b: Interval) -> Interval {
    Interval {
        min: a.min.max(b.min),
        max: a.max.min(b.max),
    }
}

/// `true` iff the two intervals share no point.
pub fn is_disjoint(a: Interval, b: Interval) -> bool {
    a.max < b.min || b.max < a.min
}

/// `true` iff the intervals overlap.
///
/// Intervals that only touch, like `[1, 2]` and `[2, 3]`, count as
/// overlapping only when `include_edges` is set.
pub fn is_overlapping(a: Interval, b: Interval, include_edges: bool) -> bool {
    if is_disjoint(a, b) {
        return false;
    }
    let shared = intersection(a, b);
    shared.min != shared.max || include_edges
}

/// Sum of all values.
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean. NaN for an empty slice.
pub fn average(values: &[f64]) -> f64 {
    sum(values) / values.len() as f64
}

/// Returns a function rounding to the nearest multiple of `step`.
///
/// ```
/// let snap = seatplan_core::math::round_to(5.0);
/// assert_eq!(snap(12.4), 10.0);
/// assert_eq!(snap(12.6), 15.0);
/// ```
pub fn round_to(step: f64) -> impl Fn(f64) -> f64 {
    move |n| (n / step).round() * step
}

/// Forces `x` into `[min, max]`. When `min > max`, `min` wins.
pub fn clamp(min: f64, x: f64, max: f64) -> f64 {
    min.max(x.min(max))
}
