//! Raw record to canonical [`Booking`] conversion.
//!
//! Every step here fails soft: a record that cannot be mapped yields `None`
//! and never aborts the surrounding batch. Upstream data quality is uneven
//! and a single malformed booking must not take the whole feed down.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::booking::Booking;
use crate::constants::FALLBACK_GUEST_NAME;
use crate::fields;
use crate::raw::RawBooking;

/// Upstream states that never become calendar events.
/// Compared case-insensitively after trimming.
const REJECTED_STATES: &[&str] = &[
    "cancelled",
    "canceled",
    "void",
    "rejected",
    "tentative",
    "quote",
];

/// Formats tried, in order, for free-form date strings.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Formats tried, in order, for date-with-time strings that are not
/// valid RFC 3339.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Add-on vocabulary kept by the allow-list filter, matched as lowercase
/// substrings of the display label.
const KNOWN_EXTRAS: &[&str] = &["pet", "dog", "high chair", "highchair", "cot", "twin"];

/// Choices the upstream data does not settle for us.
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    /// Treat a missing `balance` as zero outstanding, so `amount_paid`
    /// becomes the full booking value. Off by default: with no balance the
    /// amount paid is unknown, not settled.
    pub missing_balance_is_zero: bool,
    /// Restrict extras to the known add-on vocabulary (pets, high chair,
    /// cot, twin beds) instead of passing upstream labels through verbatim.
    pub known_extras_only: bool,
}

/// Convert one raw record into a [`Booking`], or `None` when the record is
/// rejected (cancelled-category state) or unusable (unresolvable dates).
pub fn normalize(raw: &RawBooking, opts: &NormalizeOptions) -> Option<Booking> {
    // 1. State filter: drop the cancelled/void/rejected/tentative/quote
    // category; anything else proceeds.
    if let Some(state) = raw.text(fields::STATE) {
        if REJECTED_STATES.contains(&state.to_lowercase().as_str()) {
            return None;
        }
    }

    // 2. Both stay dates must resolve, and the departure must fall strictly
    // after the arrival.
    let arrival = raw.get(fields::ARRIVAL).and_then(to_date)?;
    let departure = raw.get(fields::DEPARTURE).and_then(to_date)?;
    if departure <= arrival {
        return None;
    }

    // 3. Guest name from forename + surname, with a fixed fallback.
    let name_parts: Vec<String> = [raw.text(fields::FORENAME), raw.text(fields::SURNAME)]
        .into_iter()
        .flatten()
        .collect();
    let guest_name = if name_parts.is_empty() {
        FALLBACK_GUEST_NAME.to_string()
    } else {
        name_parts.join(" ")
    };

    // 4. Contact details.
    let email = raw.text(fields::EMAIL);
    let phone = raw.text(fields::PHONE);

    // 5. Party size: silently optional, positive integers only.
    let party_size = raw
        .integer(fields::PARTY_SIZE)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0);

    // 6. Money: amount paid is derived, never read directly.
    let value = raw.number(fields::VALUE);
    let balance = raw.number(fields::BALANCE);
    let amount_paid = match (value, balance) {
        (Some(value), Some(balance)) => Some((value - balance).max(0.0)),
        (Some(value), None) if opts.missing_balance_is_zero => Some(value.max(0.0)),
        _ => None,
    };
    let currency = raw
        .text(fields::CURRENCY)
        .map(|c| c.to_uppercase())
        .filter(|c| c.len() == 3);

    // 7. Add-ons.
    let extras = extract_extras(raw, opts);

    Some(Booking {
        guest_name,
        arrival,
        departure,
        email,
        phone,
        party_size,
        extras,
        reference: raw.text(fields::REFERENCE),
        property_name: raw.text(fields::PROPERTY_NAME),
        property_id: raw.text(fields::PROPERTY_ID),
        channel: raw.text(fields::CHANNEL),
        currency,
        amount_paid,
    })
}

/// Normalize a batch of raw records, dropping the ones that do not map.
pub fn normalize_all(raws: &[RawBooking], opts: &NormalizeOptions) -> Vec<Booking> {
    raws.iter().filter_map(|raw| normalize(raw, opts)).collect()
}

/// Coerce an upstream date value to a calendar date.
///
/// Numbers are Unix epoch seconds (UTC date portion); strings go through
/// the format tables, with bare epoch digits as the last resort.
fn to_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(n) => from_epoch(n.as_f64()? as i64),
        Value::String(s) => parse_date_str(s.trim()),
        _ => None,
    }
}

fn from_epoch(secs: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive())
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }
    if let Ok(secs) = s.parse::<i64>() {
        return from_epoch(secs);
    }
    None
}

fn extract_extras(raw: &RawBooking, opts: &NormalizeOptions) -> Vec<String> {
    let Some(items) = raw.list(fields::EXTRAS) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Value::Object(entry) => extra_label(entry),
            _ => None,
        })
        .filter(|label| !opts.known_extras_only || is_known_extra(label))
        .collect()
}

/// Build a display label from one add-on record.
///
/// Records carrying a `type` discriminator (the nested `lines` shape) count
/// only when it is "extra"; plain records (the `extras`/`add_ons` shapes)
/// always count.
fn extra_label(entry: &Map<String, Value>) -> Option<String> {
    if let Some(kind) = entry.get("type").and_then(Value::as_str) {
        if !kind.eq_ignore_ascii_case("extra") {
            return None;
        }
    }

    let name = ["name", "title", "code"]
        .iter()
        .find_map(|key| entry.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let quantity = ["quantity", "qty"]
        .iter()
        .find_map(|key| entry.get(*key))
        .and_then(to_quantity);

    match (name, quantity) {
        (Some(name), Some(qty)) if qty >= 1 => Some(format!("{name} x{qty}")),
        (Some(name), _) => Some(name.to_string()),
        (None, _) => Some("Extra".to_string()),
    }
}

fn to_quantity(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn is_known_extra(label: &str) -> bool {
    let label = label.to_lowercase();
    KNOWN_EXTRAS.iter().any(|known| label.contains(known))
}
