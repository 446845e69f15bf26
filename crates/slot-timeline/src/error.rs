//! Error types for slot-timeline operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A slot carried a `slotType` tag the domain does not know.
    #[error("Unknown {domain} slot type: '{tag}'")]
    UnknownSlotType { domain: &'static str, tag: String },

    /// A service slot arrived without a `quantity`.
    #[error("Service slot starting at {start} has no quantity")]
    MissingQuantity { start: DateTime<Utc> },

    /// A slot ends before it starts.
    #[error("Slot ends at {end}, before its start at {start}")]
    InvalidSlotRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Service quantities too large to sum without overflowing.
    #[error("Service quantities overflow at slot starting {start}")]
    QuantityOverflow { start: DateTime<Utc> },
}

pub type Result<T> = std::result::Result<T, TimelineError>;
