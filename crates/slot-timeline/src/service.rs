//! Remaining-capacity timelines for services.
//!
//! Availability slots add capacity while they are active; reservation slots take
//! it away. The running total is reported as-is: overbooking shows up as a
//! negative quantity rather than being clamped to zero.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimelineError;
use crate::event::RawSlot;
use crate::interval::Interval;
use crate::resolver::Resolver;
use crate::sweep::build_timeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceSlotKind {
    Availability,
    Reservation,
}

impl fmt::Display for ServiceSlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceSlotKind::Availability => f.write_str("Availability"),
            ServiceSlotKind::Reservation => f.write_str("Reservation"),
        }
    }
}

impl FromStr for ServiceSlotKind {
    type Err = TimelineError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "Availability" => Ok(ServiceSlotKind::Availability),
            "Reservation" => Ok(ServiceSlotKind::Reservation),
            other => Err(TimelineError::UnknownSlotType {
                domain: "service",
                tag: other.to_string(),
            }),
        }
    }
}

/// Payload of a service slot: what kind of slot it is and how many units it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityDelta {
    pub kind: ServiceSlotKind,
    pub quantity: i64,
}

impl CapacityDelta {
    pub fn availability(quantity: i64) -> Self {
        Self {
            kind: ServiceSlotKind::Availability,
            quantity,
        }
    }

    pub fn reservation(quantity: i64) -> Self {
        Self {
            kind: ServiceSlotKind::Reservation,
            quantity,
        }
    }

    /// Signed change in remaining capacity while this slot is active.
    fn signed(&self) -> i64 {
        match self.kind {
            ServiceSlotKind::Availability => self.quantity,
            ServiceSlotKind::Reservation => -self.quantity,
        }
    }
}

/// Tracks remaining quantity; never clamps.
///
/// Arithmetic is unchecked: callers keep the summed magnitude of all quantities
/// within `i64`, as the response translation does.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceResolver;

impl Resolver for ServiceResolver {
    type Payload = CapacityDelta;
    type State = i64;
    type Value = i64;

    fn initial_state(&self) -> i64 {
        0
    }

    fn enter(&self, remaining: &mut i64, delta: &CapacityDelta) {
        *remaining += delta.signed();
    }

    fn exit(&self, remaining: &mut i64, delta: &CapacityDelta) {
        *remaining -= delta.signed();
    }

    fn resolve(&self, remaining: &i64) -> i64 {
        *remaining
    }

    fn values_equal(&self, a: &i64, b: &i64) -> bool {
        a == b
    }
}

/// Consolidate service slots into a minimal remaining-quantity timeline.
pub fn build_service_timeline(slots: &[RawSlot<CapacityDelta>]) -> Vec<Interval<i64>> {
    build_timeline(&ServiceResolver, slots)
}

/// True when at least one interval has capacity left.
pub fn has_remaining_capacity(timeline: &[Interval<i64>]) -> bool {
    timeline.iter().any(|interval| interval.value > 0)
}
