//! Feed event model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One all-day event in a generated feed.
///
/// Start and end are date-only; `end` is exclusive per the iCalendar
/// all-day convention (the first day *not* covered by the event).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEvent {
    /// Deterministic identifier, stable across renders of the same input.
    pub uid: String,
    pub summary: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub description: String,
}

/// Position of a split-mode day event within a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Arrival,
    Middle,
    Departure,
}

impl DayKind {
    /// Tag mixed into split-mode UIDs.
    pub fn tag(&self) -> &'static str {
        match self {
            DayKind::Arrival => "IN",
            DayKind::Middle => "MID",
            DayKind::Departure => "OUT",
        }
    }
}
