//! Translation from the booking platform's slot JSON into consolidated timelines.
//!
//! The platform returns one object per dimension (resource) with a flat list of
//! slots, each shaped like:
//!
//! ```json
//! { "startTime": "2022-01-01T00:00:00.000Z",
//!   "endTime":   "2022-01-01T08:00:00.000Z",
//!   "dataObject": { "slotType": "Closed" } }
//! ```
//!
//! Service slots additionally carry `dataObject.quantity`. Slot tags are
//! validated here, before any sweep runs; an unknown tag rejects the whole response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::availability::{build_availability_timeline, is_fully_closed, SlotStatus};
use crate::error::{Result, TimelineError};
use crate::event::RawSlot;
use crate::interval::{slots_between, Interval};
use crate::service::{build_service_timeline, has_remaining_capacity, CapacityDelta};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSlotData {
    pub slot_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSlotRecord {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub data_object: RawSlotData,
}

impl RawSlotRecord {
    /// The sweep assumes `start <= end`; reject inverted slots before they reach it.
    fn checked_bounds(&self) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        if self.end_time < self.start_time {
            return Err(TimelineError::InvalidSlotRange {
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok((self.start_time, self.end_time))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAvailabilityResponse {
    #[serde(default)]
    pub start_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date_time: Option<DateTime<Utc>>,
    pub dimension_id: String,
    #[serde(default)]
    pub time_slots: Vec<RawSlotRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawServiceEntry {
    /// The service record as the platform sent it.
    pub service: Value,
    #[serde(default)]
    pub time_slots: Vec<RawSlotRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawServiceResponse {
    pub dimension_id: String,
    #[serde(default)]
    pub services: Vec<RawServiceEntry>,
}

/// The platform answers multi-dimension queries with an array, single ones with an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// The consolidated availability of one dimension over the requested range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub start_of_range: Option<DateTime<Utc>>,
    pub end_of_range: Option<DateTime<Utc>>,
    pub dimension_id: String,
    pub time_slots: Vec<Interval<SlotStatus>>,
}

impl AvailabilityResponse {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawAvailabilityResponse = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    pub fn time_slots(&self) -> &[Interval<SlotStatus>] {
        &self.time_slots
    }

    /// True when nothing in the timeline is open.
    pub fn is_closed(&self) -> bool {
        is_fully_closed(&self.time_slots)
    }

    /// Intervals overlapping `[start, end)`, clipped to that window.
    pub fn slots_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<Interval<SlotStatus>> {
        slots_between(&self.time_slots, start, end)
    }
}

impl TryFrom<RawAvailabilityResponse> for AvailabilityResponse {
    type Error = TimelineError;

    fn try_from(raw: RawAvailabilityResponse) -> Result<Self> {
        let slots = raw
            .time_slots
            .iter()
            .map(|record| {
                let (start, end) = record.checked_bounds()?;
                let status: SlotStatus = record.data_object.slot_type.parse()?;
                Ok(RawSlot::new(start, end, status))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            start_of_range: raw.start_date_time,
            end_of_range: raw.end_date_time,
            dimension_id: raw.dimension_id,
            time_slots: build_availability_timeline(&slots),
        })
    }
}

/// Parse one availability response object, or an array of them.
pub fn parse_availability_responses(json: &str) -> Result<Vec<AvailabilityResponse>> {
    let raw: OneOrMany<RawAvailabilityResponse> = serde_json::from_str(json)?;
    raw.into_vec()
        .into_iter()
        .map(AvailabilityResponse::try_from)
        .collect()
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// One service of a dimension with its remaining-quantity timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTimeline {
    pub id: Option<String>,
    pub name: Option<String>,
    pub record: Value,
    pub time_slots: Vec<Interval<i64>>,
}

impl ServiceTimeline {
    /// True when any interval still has capacity left.
    pub fn is_available(&self) -> bool {
        has_remaining_capacity(&self.time_slots)
    }

    pub fn slots_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Interval<i64>> {
        slots_between(&self.time_slots, start, end)
    }
}

impl TryFrom<RawServiceEntry> for ServiceTimeline {
    type Error = TimelineError;

    fn try_from(raw: RawServiceEntry) -> Result<Self> {
        // The running total never exceeds the sum of all magnitudes, so bounding
        // that sum keeps the sweep's arithmetic in range.
        let mut magnitude: i64 = 0;
        let slots = raw
            .time_slots
            .iter()
            .map(|record| {
                let (start, end) = record.checked_bounds()?;
                let kind = record.data_object.slot_type.parse()?;
                let quantity = record
                    .data_object
                    .quantity
                    .ok_or(TimelineError::MissingQuantity {
                        start: record.start_time,
                    })?;
                magnitude = quantity
                    .checked_abs()
                    .and_then(|q| magnitude.checked_add(q))
                    .ok_or(TimelineError::QuantityOverflow { start })?;
                Ok(RawSlot::new(start, end, CapacityDelta { kind, quantity }))
            })
            .collect::<Result<Vec<_>>>()?;

        let field = |key: &str| {
            raw.service
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Ok(Self {
            id: field("Id"),
            name: field("Name"),
            time_slots: build_service_timeline(&slots),
            record: raw.service,
        })
    }
}

/// The consolidated service capacity of one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    pub dimension_id: String,
    pub services: Vec<ServiceTimeline>,
}

impl ServiceResponse {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawServiceResponse = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Look a service up by record id, falling back to its name.
    pub fn service(&self, id_or_name: &str) -> Option<&ServiceTimeline> {
        self.services
            .iter()
            .find(|s| s.id.as_deref() == Some(id_or_name))
            .or_else(|| {
                self.services
                    .iter()
                    .find(|s| s.name.as_deref() == Some(id_or_name))
            })
    }
}

impl TryFrom<RawServiceResponse> for ServiceResponse {
    type Error = TimelineError;

    fn try_from(raw: RawServiceResponse) -> Result<Self> {
        let services = raw
            .services
            .into_iter()
            .map(ServiceTimeline::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            dimension_id: raw.dimension_id,
            services,
        })
    }
}

/// Parse one service response object, or an array of them.
pub fn parse_service_responses(json: &str) -> Result<Vec<ServiceResponse>> {
    let raw: OneOrMany<RawServiceResponse> = serde_json::from_str(json)?;
    raw.into_vec()
        .into_iter()
        .map(ServiceResponse::try_from)
        .collect()
}
