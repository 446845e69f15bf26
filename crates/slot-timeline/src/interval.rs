//! The output unit of a timeline build.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A half-open span `[start, end)` with the value the resolver assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval<V> {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub value: V,
}

impl<V> Interval<V> {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, value: V) -> Self {
        Self { start, end, value }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// True when this interval shares any time with `[start, end)`.
    /// Touching at a single instant does not count.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && start < self.end
    }
}

impl<V: Clone> Interval<V> {
    /// The part of this interval inside `[start, end)`, or `None` if they do not overlap.
    pub fn clip(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Interval<V>> {
        if !self.overlaps(start, end) {
            return None;
        }
        Some(Interval {
            start: self.start.max(start),
            end: self.end.min(end),
            value: self.value.clone(),
        })
    }
}

/// Intervals of `timeline` that overlap `[window_start, window_end)`, clipped to it.
pub fn slots_between<V: Clone>(
    timeline: &[Interval<V>],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<Interval<V>> {
    if window_start >= window_end {
        return Vec::new();
    }
    timeline
        .iter()
        .filter_map(|interval| interval.clip(window_start, window_end))
        .collect()
}
