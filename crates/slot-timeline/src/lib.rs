//! # slot-timeline
//!
//! Consolidates reservation-platform slots into minimal, ordered timelines.
//!
//! The booking platform reports availability as a flat list of overlapping slots
//! (open hours, closures, reservations, service capacity). This crate turns such a
//! list into a gap-free, non-overlapping sequence of intervals, each carrying one
//! resolved value, using a single sweep-line engine parameterised by a
//! per-domain [`Resolver`].
//!
//! ## Quick start
//!
//! ```rust
//! use slot_timeline::{AvailabilityResponse, SlotStatus};
//!
//! let json = r#"{
//!   "dimensionId": "a0B000000000001",
//!   "timeSlots": [
//!     { "startTime": "2022-01-01T08:00:00Z", "endTime": "2022-01-01T16:00:00Z",
//!       "dataObject": { "slotType": "Open" } },
//!     { "startTime": "2022-01-01T10:00:00Z", "endTime": "2022-01-01T12:00:00Z",
//!       "dataObject": { "slotType": "Reservation" } }
//!   ]
//! }"#;
//!
//! let response = AvailabilityResponse::from_json(json).unwrap();
//! let statuses: Vec<SlotStatus> = response.time_slots.iter().map(|i| i.value).collect();
//! assert_eq!(statuses, [SlotStatus::Open, SlotStatus::Reservation, SlotStatus::Open]);
//! ```
//!
//! ## Modules
//!
//! - [`event`] — slots and their start/end boundary events
//! - [`resolver`] — the per-domain state/value seam
//! - [`sweep`] — the sweep-line engine
//! - [`coalesce`] — merge adjacent intervals with equal values
//! - [`availability`] — open/closed/reservation status timelines
//! - [`service`] — remaining-quantity timelines
//! - [`response`] — platform JSON → timelines
//! - [`dimension`] — resource result sets filtered by availability
//! - [`interval`] — the output interval type and window helpers
//! - [`error`] — Error types

pub mod availability;
pub mod coalesce;
pub mod dimension;
pub mod error;
pub mod event;
pub mod interval;
pub mod resolver;
pub mod response;
pub mod service;
pub mod sweep;

pub use availability::{build_availability_timeline, AvailabilityResolver, SlotStatus};
pub use coalesce::coalesce;
pub use dimension::{DimensionRecord, DimensionRecordSet};
pub use error::TimelineError;
pub use event::{Boundary, RawSlot};
pub use interval::Interval;
pub use resolver::Resolver;
pub use response::{
    parse_availability_responses, parse_service_responses, AvailabilityResponse, ServiceResponse,
    ServiceTimeline,
};
pub use service::{build_service_timeline, CapacityDelta, ServiceResolver, ServiceSlotKind};
pub use sweep::build_timeline;
