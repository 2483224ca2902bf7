//! ICS feed generation.

use chrono::NaiveDate;
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use crate::constants::PRODID;
use crate::error::BookcalResult;
use crate::event::FeedEvent;

/// Generate one .ics document for a list of feed events.
///
/// Output is fully deterministic: DTSTAMP is derived from the event start
/// rather than the wall clock, so an unchanged booking list renders to
/// identical bytes and calendar clients see no spurious updates.
pub fn generate_feed(events: &[FeedEvent], title: Option<&str>) -> BookcalResult<String> {
    let mut cal = Calendar::new();

    if let Some(title) = title {
        cal.append_property(Property::new("X-WR-CALNAME", title));
    }

    for event in events {
        cal.push(to_ics_event(event));
    }

    let cal = cal.done();
    Ok(normalize_output(&cal.to_string()))
}

fn to_ics_event(event: &FeedEvent) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.summary);

    // DTSTAMP is required by RFC 5545. Derived from the event start, not
    // the clock, to keep regenerated feeds byte-identical.
    let dtstamp = format!("{}T000000Z", event.start.format("%Y%m%d"));
    ics_event.add_property("DTSTAMP", &dtstamp);

    add_date_property(&mut ics_event, "DTSTART", event.start);
    add_date_property(&mut ics_event, "DTEND", event.end);

    ics_event.description(&event.description);

    ics_event.done()
}

/// Add a date-only property (all-day semantics, VALUE=DATE).
fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

/// Clean up the icalendar crate's output:
/// - pin PRODID to the bookcal identifier
/// - drop CALSCALE:GREGORIAN (it is the default)
fn normalize_output(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use icalendar::parser::unfold;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn make_event() -> FeedEvent {
        FeedEvent {
            uid: "bookcal-48211-20240601".to_string(),
            summary: "Jane Smith".to_string(),
            start: june(1),
            end: june(4),
            description: "Email: jane@example.com\nMobile: 07700 900123".to_string(),
        }
    }

    #[test]
    fn all_day_events_use_value_date() {
        let ics = generate_feed(&[make_event()], None).unwrap();

        assert!(
            ics.contains("DTSTART;VALUE=DATE:20240601"),
            "DTSTART should be date-only. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND;VALUE=DATE:20240604"),
            "DTEND should be the exclusive departure day. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn header_carries_fixed_prodid_and_version() {
        let ics = generate_feed(&[make_event()], None).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.contains("PRODID:-//bookcal//EN\r\n"));
        assert!(ics.contains("VERSION:2.0\r\n"));
        assert!(!ics.contains("CALSCALE"), "CALSCALE should be stripped");
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn empty_feed_is_a_valid_document() {
        let ics = generate_feed(&[], None).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn title_becomes_calendar_name() {
        let ics = generate_feed(&[], Some("Rose Cottage - Guests")).unwrap();
        let unfolded = unfold(&ics);
        assert!(unfolded.contains("X-WR-CALNAME:Rose Cottage - Guests"));
    }

    #[test]
    fn untitled_feed_has_no_calendar_name() {
        let ics = generate_feed(&[], None).unwrap();
        assert!(!ics.contains("X-WR-CALNAME"));
    }

    #[test]
    fn dtstamp_is_derived_from_the_event_start() {
        let ics = generate_feed(&[make_event()], None).unwrap();
        assert!(ics.contains("DTSTAMP:20240601T000000Z"));
    }

    #[test]
    fn lines_are_crlf_terminated() {
        let ics = generate_feed(&[make_event()], None).unwrap();
        for line in ics.split_inclusive("\r\n") {
            assert!(line.ends_with("\r\n"), "line without CRLF: {:?}", line);
        }
    }
}
