//! Availability status timelines.
//!
//! Each slot says a resource is open, closed, or reserved over some span. Slots
//! overlap freely; the [`AvailabilityResolver`] decides which status wins while
//! several are active at once.
//!
//! The precedence `Closed > Reservation > Open` is a product rule of the booking
//! platform (an administrative closure vetoes everything, a reservation hides the
//! open availability underneath it). It is not required by the sweep itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimelineError;
use crate::event::RawSlot;
use crate::interval::Interval;
use crate::resolver::Resolver;
use crate::sweep::build_timeline;

/// Status of a resource over an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotStatus {
    Open,
    Closed,
    Reservation,
}

impl SlotStatus {
    /// The platform's `slotType` tag for this status.
    pub fn tag(self) -> &'static str {
        match self {
            SlotStatus::Open => "Open",
            SlotStatus::Closed => "Closed",
            SlotStatus::Reservation => "Reservation",
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SlotStatus {
    type Err = TimelineError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "Open" => Ok(SlotStatus::Open),
            "Closed" => Ok(SlotStatus::Closed),
            "Reservation" => Ok(SlotStatus::Reservation),
            other => Err(TimelineError::UnknownSlotType {
                domain: "availability",
                tag: other.to_string(),
            }),
        }
    }
}

/// How many currently active slots carry each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub open: usize,
    pub closed: usize,
    pub reservation: usize,
}

impl StatusCounts {
    fn count_mut(&mut self, status: SlotStatus) -> &mut usize {
        match status {
            SlotStatus::Open => &mut self.open,
            SlotStatus::Closed => &mut self.closed,
            SlotStatus::Reservation => &mut self.reservation,
        }
    }
}

/// Resolves overlapping status slots by `Closed > Reservation > Open`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityResolver;

impl Resolver for AvailabilityResolver {
    type Payload = SlotStatus;
    type State = StatusCounts;
    type Value = SlotStatus;

    fn initial_state(&self) -> StatusCounts {
        StatusCounts::default()
    }

    fn enter(&self, state: &mut StatusCounts, status: &SlotStatus) {
        *state.count_mut(*status) += 1;
    }

    /// Panics if `status` has no active slot: an end without a matching start means
    /// the input slots are corrupt.
    fn exit(&self, state: &mut StatusCounts, status: &SlotStatus) {
        let count = state.count_mut(*status);
        assert!(
            *count > 0,
            "{status} slot ended without a matching start"
        );
        *count -= 1;
    }

    fn resolve(&self, state: &StatusCounts) -> SlotStatus {
        if state.closed > 0 {
            SlotStatus::Closed
        } else if state.reservation > 0 {
            SlotStatus::Reservation
        } else {
            SlotStatus::Open
        }
    }

    fn values_equal(&self, a: &SlotStatus, b: &SlotStatus) -> bool {
        a == b
    }
}

/// Consolidate status slots into a minimal availability timeline.
pub fn build_availability_timeline(slots: &[RawSlot<SlotStatus>]) -> Vec<Interval<SlotStatus>> {
    build_timeline(&AvailabilityResolver, slots)
}

/// True when no interval of `timeline` is open, including the empty timeline.
pub fn is_fully_closed(timeline: &[Interval<SlotStatus>]) -> bool {
    !timeline
        .iter()
        .any(|interval| interval.value == SlotStatus::Open)
}
