//! Canonical booking model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A normalized booking, vendor quirks resolved.
///
/// Only [`crate::normalize`] constructs these: both stay dates resolved,
/// departure strictly after arrival, and the upstream state outside the
/// rejected category. Immutable once built; one render pass consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Display name of the lead guest, never empty.
    pub guest_name: String,
    /// Inclusive first day of the stay.
    pub arrival: NaiveDate,
    /// Exclusive end of the stay (the day the guest leaves).
    pub departure: NaiveDate,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub party_size: Option<u32>,
    /// Display labels of booked add-ons, possibly with an " xN" suffix.
    pub extras: Vec<String>,
    /// Stable upstream identifier; the basis for deterministic UIDs.
    pub reference: Option<String>,
    pub property_name: Option<String>,
    pub property_id: Option<String>,
    /// Booking source/agency label.
    pub channel: Option<String>,
    /// Upper-cased 3-letter currency code.
    pub currency: Option<String>,
    /// max(0, value - balance); absent unless both sides were parseable.
    pub amount_paid: Option<f64>,
}

impl Booking {
    /// Number of nights spent at the property.
    pub fn nights(&self) -> i64 {
        (self.departure - self.arrival).num_days()
    }
}
