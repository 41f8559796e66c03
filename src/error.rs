//! Error type shared by the layout services.
//!
//! Only caller bugs surface here. Bad event data is clamped or dropped and
//! reported as a [`crate::models::layout::Diagnostic`] instead.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::event::{EventCategory, EventId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("a week needs exactly 7 consecutive days: {0}")]
    InvalidWeek(String),

    #[error("invalid layout settings: {0}")]
    InvalidSettings(String),

    #[error("{year}-{month:02} is not a valid month")]
    InvalidMonth { year: i32, month: u32 },

    #[error("day-of-week column {0} is outside 0..=6")]
    ColumnOutOfRange(usize),

    #[error("track reconciler contract violated on {date}: {reason}")]
    ReconcileContract { date: NaiveDate, reason: String },

    #[error("event {event_id} placed in the {found:?} lane on {date}, classified as {expected:?}")]
    LaneMismatch {
        date: NaiveDate,
        event_id: EventId,
        expected: EventCategory,
        found: EventCategory,
    },
}
