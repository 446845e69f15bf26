//! WASM bindings for slot-timeline.
//!
//! Exposes availability and service timeline construction to the JavaScript SDK
//! via `wasm-bindgen`. The platform's raw response JSON goes in as a string and
//! the consolidated timelines come back as a JSON string.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-timeline-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-timeline-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_timeline_wasm.wasm
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use slot_timeline::{
    parse_availability_responses, parse_service_responses, AvailabilityResponse, Interval,
    ServiceResponse, SlotStatus,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimeSlotDto<V> {
    start_of_slot: String,
    end_of_slot: String,
    duration_minutes: i64,
    #[serde(flatten)]
    value: V,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusValue {
    #[serde(rename = "type")]
    status: SlotStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuantityValue {
    remaining_quantity: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DimensionDto {
    dimension_id: String,
    start_of_range: Option<String>,
    end_of_range: Option<String>,
    is_closed: bool,
    time_slots: Vec<TimeSlotDto<StatusValue>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceDto {
    id: Option<String>,
    name: Option<String>,
    is_available: bool,
    time_slots: Vec<TimeSlotDto<QuantityValue>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceDimensionDto {
    dimension_id: String,
    services: Vec<ServiceDto>,
}

fn slot_dto<V, W>(interval: &Interval<V>, value: W) -> TimeSlotDto<W> {
    TimeSlotDto {
        start_of_slot: interval.start.to_rfc3339(),
        end_of_slot: interval.end.to_rfc3339(),
        duration_minutes: interval.duration_minutes(),
        value,
    }
}

impl From<&AvailabilityResponse> for DimensionDto {
    fn from(r: &AvailabilityResponse) -> Self {
        Self {
            dimension_id: r.dimension_id.clone(),
            start_of_range: r.start_of_range.map(|t| t.to_rfc3339()),
            end_of_range: r.end_of_range.map(|t| t.to_rfc3339()),
            is_closed: r.is_closed(),
            time_slots: r
                .time_slots
                .iter()
                .map(|i| slot_dto(i, StatusValue { status: i.value }))
                .collect(),
        }
    }
}

impl From<&ServiceResponse> for ServiceDimensionDto {
    fn from(r: &ServiceResponse) -> Self {
        Self {
            dimension_id: r.dimension_id.clone(),
            services: r
                .services
                .iter()
                .map(|s| ServiceDto {
                    id: s.id.clone(),
                    name: s.name.clone(),
                    is_available: s.is_available(),
                    time_slots: s
                        .time_slots
                        .iter()
                        .map(|i| {
                            slot_dto(
                                i,
                                QuantityValue {
                                    remaining_quantity: i.value,
                                },
                            )
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Plain-Rust entry points (errors as strings so they can be tested natively)
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn availability_json(responses_json: &str) -> Result<String, String> {
    let responses = parse_availability_responses(responses_json).map_err(|e| e.to_string())?;
    let dtos: Vec<DimensionDto> = responses.iter().map(DimensionDto::from).collect();
    to_json(&dtos)
}

fn open_dimensions_json(responses_json: &str) -> Result<String, String> {
    let responses = parse_availability_responses(responses_json).map_err(|e| e.to_string())?;
    let ids: Vec<&str> = responses
        .iter()
        .filter(|r| !r.is_closed())
        .map(|r| r.dimension_id.as_str())
        .collect();
    to_json(&ids)
}

fn availability_between_json(
    responses_json: &str,
    window_start: &str,
    window_end: &str,
) -> Result<String, String> {
    let start = parse_datetime(window_start)?;
    let end = parse_datetime(window_end)?;
    if start >= end {
        return Err(format!(
            "Window start '{}' must be before window end '{}'",
            window_start, window_end
        ));
    }
    let mut responses =
        parse_availability_responses(responses_json).map_err(|e| e.to_string())?;
    for response in &mut responses {
        response.time_slots = response.slots_between(start, end);
    }
    let dtos: Vec<DimensionDto> = responses.iter().map(DimensionDto::from).collect();
    to_json(&dtos)
}

fn services_json(responses_json: &str) -> Result<String, String> {
    let responses = parse_service_responses(responses_json).map_err(|e| e.to_string())?;
    let dtos: Vec<ServiceDimensionDto> = responses.iter().map(ServiceDimensionDto::from).collect();
    to_json(&dtos)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Build availability timelines from an availability response (object or array).
///
/// Returns a JSON array with one entry per dimension: `dimensionId`,
/// `startOfRange`, `endOfRange`, `isClosed` and `timeSlots`, where each slot has
/// `startOfSlot`, `endOfSlot`, `durationMinutes` and `type`.
#[wasm_bindgen(js_name = "buildAvailabilityTimeline")]
pub fn build_availability_timeline(responses_json: &str) -> Result<String, JsValue> {
    availability_json(responses_json).map_err(|e| JsValue::from_str(&e))
}

/// Like [`build_availability_timeline`] but clipped to `[window_start, window_end)`.
#[wasm_bindgen(js_name = "buildAvailabilityTimelineBetween")]
pub fn build_availability_timeline_between(
    responses_json: &str,
    window_start: &str,
    window_end: &str,
) -> Result<String, JsValue> {
    availability_between_json(responses_json, window_start, window_end)
        .map_err(|e| JsValue::from_str(&e))
}

/// Ids of the dimensions that have at least one open interval, as a JSON array.
#[wasm_bindgen(js_name = "openDimensionIds")]
pub fn open_dimension_ids(responses_json: &str) -> Result<String, JsValue> {
    open_dimensions_json(responses_json).map_err(|e| JsValue::from_str(&e))
}

/// Build remaining-quantity timelines from a service response (object or array).
///
/// Each service carries `id`, `name`, `isAvailable` and `timeSlots` with
/// `remainingQuantity` per slot.
#[wasm_bindgen(js_name = "buildServiceTimelines")]
pub fn build_service_timelines(responses_json: &str) -> Result<String, JsValue> {
    services_json(responses_json).map_err(|e| JsValue::from_str(&e))
}
