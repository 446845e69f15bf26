//! Sweep-line timeline construction.
//!
//! Sorts slot boundaries, walks them left to right while the [`Resolver`] keeps
//! a running state, and emits one interval for every gap between distinct
//! timestamps. The result is coalesced before it is returned, so callers always
//! see the minimal timeline.

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::coalesce::coalesce;
use crate::event::{events_from_slots, RawSlot};
use crate::interval::Interval;
use crate::resolver::Resolver;

/// Build the consolidated timeline for `slots` under `resolver`.
///
/// The output is ordered, gap-free and non-overlapping, and spans exactly
/// `[earliest start, latest end)`. Empty input yields an empty timeline.
pub fn build_timeline<R: Resolver>(
    resolver: &R,
    slots: &[RawSlot<R::Payload>],
) -> Vec<Interval<R::Value>> {
    let raw = sweep(resolver, slots);
    let raw_len = raw.len();
    let timeline = coalesce(raw, |a, b| resolver.values_equal(a, b));

    debug!(
        slots = slots.len(),
        raw_intervals = raw_len,
        intervals = timeline.len(),
        "built timeline"
    );
    timeline
}

/// The uncoalesced sweep: one interval per distinct timestamp gap.
pub fn sweep<R: Resolver>(
    resolver: &R,
    slots: &[RawSlot<R::Payload>],
) -> Vec<Interval<R::Value>> {
    let events = events_from_slots(slots);
    let mut intervals = Vec::new();

    let Some((first, rest)) = events.split_first() else {
        return intervals;
    };

    // The earliest boundary is always an entry; nothing is emitted before it.
    let mut state = resolver.initial_state();
    resolver.enter(&mut state, first.payload);
    let mut interval_start: DateTime<Utc> = first.timestamp;

    for event in rest {
        if event.timestamp != interval_start {
            let value = resolver.resolve(&state);
            trace!(start = %interval_start, end = %event.timestamp, "emit interval");
            intervals.push(Interval::new(interval_start, event.timestamp, value));
            interval_start = event.timestamp;
        }
        resolver.apply(&mut state, event);
    }

    intervals
}
