//! ICS feed parsing using the icalendar crate's parser.
//!
//! A generated feed must always come back through here cleanly; round-trip
//! tests and the CLI preview rely on that.

use chrono::NaiveDate;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::error::{BookcalError, BookcalResult};
use crate::event::FeedEvent;

/// Parse a feed document back into its events.
pub fn parse_feed(content: &str) -> BookcalResult<Vec<FeedEvent>> {
    let unfolded = unfold(content);
    let calendar =
        read_calendar(&unfolded).map_err(|e| BookcalError::IcsParse(e.to_string()))?;

    let events = calendar
        .components
        .iter()
        .filter(|component| component.name == "VEVENT")
        .filter_map(parse_event)
        .collect();

    Ok(events)
}

fn parse_event(vevent: &Component) -> Option<FeedEvent> {
    let uid = vevent.find_prop("UID")?.val.to_string();
    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(No title)".to_string());
    let start = to_date(DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?)?;
    let end = to_date(DatePerhapsTime::try_from(vevent.find_prop("DTEND")?).ok()?)?;
    let description = vevent
        .find_prop("DESCRIPTION")
        .map(|p| unescape_text(p.val.as_ref()))
        .unwrap_or_default();

    Some(FeedEvent {
        uid,
        summary,
        start,
        end,
        description,
    })
}

/// Collapse a parsed date-or-datetime to its date portion.
fn to_date(dpt: DatePerhapsTime) -> Option<NaiveDate> {
    match dpt {
        DatePerhapsTime::Date(d) => Some(d),
        DatePerhapsTime::DateTime(dt) => match dt {
            CalendarDateTime::Utc(dt) => Some(dt.date_naive()),
            CalendarDateTime::Floating(naive) => Some(naive.date()),
            CalendarDateTime::WithTimezone { date_time, .. } => Some(date_time.date()),
        },
    }
}

/// Undo RFC 5545 text escaping in a property value.
fn unescape_text(val: &str) -> String {
    let mut out = String::with_capacity(val.len());
    let mut chars = val.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
