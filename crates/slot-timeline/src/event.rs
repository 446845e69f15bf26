//! Slot boundaries as sweep events.
//!
//! Every [`RawSlot`] contributes exactly two [`Event`]s: a [`Boundary::Start`] at its
//! start and a [`Boundary::End`] at its end. Events only live for the duration of a
//! single timeline build.

use chrono::{DateTime, Utc};

/// A half-open slot `[start, end)` carrying a domain payload.
///
/// The engine does not validate `start < end`; callers must hand it well-formed slots.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSlot<P> {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub payload: P,
}

impl<P> RawSlot<P> {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, payload: P) -> Self {
        Self {
            start,
            end,
            payload,
        }
    }
}

/// Which edge of a slot an event marks.
///
/// The derived ordering puts `Start` before `End`, which is what the sweep relies on
/// to treat back-to-back slots as one seamless boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Boundary {
    Start,
    End,
}

/// One boundary of a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<'a, P> {
    pub timestamp: DateTime<Utc>,
    pub boundary: Boundary,
    pub payload: &'a P,
}

impl<'a, P> Event<'a, P> {
    /// Sort key: timestamp ascending, starts before ends on ties.
    pub fn sort_key(&self) -> (DateTime<Utc>, Boundary) {
        (self.timestamp, self.boundary)
    }
}

/// Split slots into their boundary events, sorted for the sweep.
pub fn events_from_slots<P>(slots: &[RawSlot<P>]) -> Vec<Event<'_, P>> {
    let mut events: Vec<Event<'_, P>> = slots
        .iter()
        .flat_map(|slot| {
            [
                Event {
                    timestamp: slot.start,
                    boundary: Boundary::Start,
                    payload: &slot.payload,
                },
                Event {
                    timestamp: slot.end,
                    boundary: Boundary::End,
                    payload: &slot.payload,
                },
            ]
        })
        .collect();

    events.sort_by_key(Event::sort_key);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn each_slot_yields_two_events() {
        let slots = vec![RawSlot::new(at(1), at(2), 'a'), RawSlot::new(at(3), at(4), 'b')];
        let events = events_from_slots(&slots);
        assert_eq!(events.len(), 4);
        assert_eq!(
            events.iter().filter(|e| e.boundary == Boundary::Start).count(),
            2
        );
    }

    #[test]
    fn start_sorts_before_end_at_same_instant() {
        // 'a' ends at 08:00 exactly when 'b' starts.
        let slots = vec![RawSlot::new(at(0), at(8), 'a'), RawSlot::new(at(8), at(16), 'b')];
        let events = events_from_slots(&slots);

        assert_eq!(events[1].timestamp, at(8));
        assert_eq!(events[1].boundary, Boundary::Start);
        assert_eq!(*events[1].payload, 'b');
        assert_eq!(events[2].timestamp, at(8));
        assert_eq!(events[2].boundary, Boundary::End);
        assert_eq!(*events[2].payload, 'a');
    }
}
