//! Booking list to calendar feed conversion.
//!
//! One booking becomes either a single stay-spanning event or, in split
//! mode, one event per occupied day with IN/OUT markers. UIDs are derived
//! from the booking reference and the event dates, never from anything
//! volatile: calendar clients match events across refreshes by UID, so
//! re-rendering unchanged input must reproduce them byte for byte.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::booking::Booking;
use crate::constants::{FALLBACK_DESCRIPTION, UID_PREFIX};
use crate::error::BookcalResult;
use crate::event::{DayKind, FeedEvent};
use crate::ics;

/// Short property-code lookup for split-mode event titles.
///
/// Unknown properties fall back to the first two letters of the name,
/// upper-cased, so the derived code is stable for a given property.
#[derive(Debug, Clone, Default)]
pub struct PropertyCodes(HashMap<String, String>);

impl PropertyCodes {
    pub fn new(codes: HashMap<String, String>) -> Self {
        PropertyCodes(codes)
    }

    pub fn code_for(&self, name: &str) -> Option<String> {
        if let Some(code) = self.0.get(name) {
            return Some(code.clone());
        }
        let derived: String = name.trim().chars().take(2).collect::<String>().to_uppercase();
        (!derived.is_empty()).then_some(derived)
    }
}

/// Rendering choices for one feed.
#[derive(Debug, Clone, Default)]
pub struct FeedOptions {
    /// Calendar display name (X-WR-CALNAME), omitted when `None`.
    pub title: Option<String>,
    /// Emit one event per occupied day instead of one per stay.
    pub split_days: bool,
    pub property_codes: PropertyCodes,
    /// Deep-link template for the upstream booking page; `{reference}` is
    /// substituted. No link line is emitted without a reference.
    pub booking_url: Option<String>,
}

/// Render a list of bookings into one serialized iCalendar document.
///
/// Event order follows booking order, and split-mode day events ascend
/// within a booking; nothing is reordered or deduplicated. An empty
/// booking list renders a valid header-and-footer document.
pub fn render_feed(bookings: &[Booking], opts: &FeedOptions) -> BookcalResult<String> {
    let mut events = Vec::new();
    for booking in bookings {
        events.extend(build_events(booking, opts));
    }
    ics::generate_feed(&events, opts.title.as_deref())
}

/// Expand one booking into its feed events.
pub fn build_events(booking: &Booking, opts: &FeedOptions) -> Vec<FeedEvent> {
    let description = build_description(booking, opts);

    if !opts.split_days {
        return vec![FeedEvent {
            uid: simple_uid(booking),
            summary: booking.guest_name.clone(),
            start: booking.arrival,
            end: booking.departure,
            description,
        }];
    }

    let code = booking
        .property_name
        .as_deref()
        .and_then(|name| opts.property_codes.code_for(name));

    // Arrival day, every middle night, and the departure day as its own
    // one-day event.
    let mut events = Vec::new();
    let mut day = booking.arrival;
    while day <= booking.departure {
        let kind = if day == booking.arrival {
            DayKind::Arrival
        } else if day == booking.departure {
            DayKind::Departure
        } else {
            DayKind::Middle
        };
        events.push(FeedEvent {
            uid: split_uid(booking, day, kind),
            summary: day_summary(booking, kind, code.as_deref()),
            start: day,
            end: day + Duration::days(1),
            description: description.clone(),
        });
        day = day + Duration::days(1);
    }
    events
}

fn day_summary(booking: &Booking, kind: DayKind, code: Option<&str>) -> String {
    let mut summary = match kind {
        // Unknown party size still shows x1 on the arrival day.
        DayKind::Arrival => format!(
            "IN: {} x{}",
            booking.guest_name,
            booking.party_size.unwrap_or(1)
        ),
        DayKind::Middle => booking.guest_name.clone(),
        DayKind::Departure => format!("OUT: {}", booking.guest_name),
    };
    if let Some(code) = code {
        summary.push(' ');
        summary.push_str(code);
    }
    summary
}

/// Stable identity of a booking: the upstream reference when present,
/// otherwise a slug of the guest name.
fn uid_key(booking: &Booking) -> String {
    match &booking.reference {
        Some(reference) => reference.clone(),
        None => slug::slugify(&booking.guest_name),
    }
}

fn simple_uid(booking: &Booking) -> String {
    format!(
        "{}-{}-{}",
        UID_PREFIX,
        uid_key(booking),
        booking.arrival.format("%Y%m%d")
    )
}

fn split_uid(booking: &Booking, day: NaiveDate, kind: DayKind) -> String {
    format!(
        "{}-{}-{}-{}",
        UID_PREFIX,
        uid_key(booking),
        day.format("%Y%m%d"),
        kind.tag()
    )
}

/// Assemble the event description from whichever booking fields are
/// present, in a fixed order. Absent fields contribute no line.
fn build_description(booking: &Booking, opts: &FeedOptions) -> String {
    let mut lines = Vec::new();

    if let Some(email) = &booking.email {
        lines.push(format!("Email: {email}"));
    }
    if let Some(phone) = &booking.phone {
        lines.push(format!("Mobile: {phone}"));
    }
    if let Some(party) = booking.party_size {
        lines.push(format!("Guests in party: {party}"));
    }
    if !booking.extras.is_empty() {
        lines.push(format!("Extras: {}", booking.extras.join(", ")));
    }
    if let Some(property) = &booking.property_name {
        lines.push(format!("Property: {property}"));
    }
    if let Some(channel) = &booking.channel {
        lines.push(format!("Channel: {channel}"));
    }
    if let Some(paid) = booking.amount_paid {
        let amount = match &booking.currency {
            Some(currency) => format!("{currency} {paid:.2}"),
            None => format!("{paid:.2}"),
        };
        lines.push(format!("Amount paid to us: {amount}"));
    }
    if let (Some(template), Some(reference)) = (&opts.booking_url, &booking.reference) {
        lines.push(format!(
            "Booking: {}",
            template.replace("{reference}", reference)
        ));
    }

    if lines.is_empty() {
        FALLBACK_DESCRIPTION.to_string()
    } else {
        lines.join("\n")
    }
}
