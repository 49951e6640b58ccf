//! ICS file generation.

use chrono::NaiveDate;
use icalendar::{Calendar, Component, Property, ValueType};

use crate::event::ItineraryEvent;

const PRODID: &str = "-//itinera//Travel Itinerary//EN";

/// Serialize events into a single VCALENDAR document.
///
/// Every event is all-day: DTSTART and DTEND carry `VALUE=DATE` and the
/// same date (a single-day span). UID and DTSTAMP come from the event,
/// so output for a fixed generation instant is byte-identical.
pub fn generate_ics(events: &[ItineraryEvent]) -> String {
    let mut cal = Calendar::new();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event.uid);
        ics_event.summary(&event.summary);
        ics_event.description(&event.description);

        // DTSTAMP - required by RFC 5545; the generation instant, not the
        // event date
        let dtstamp = event.stamp.format("%Y%m%dT%H%M%SZ").to_string();
        ics_event.add_property("DTSTAMP", &dtstamp);

        add_date_property(&mut ics_event, "DTSTART", event.date);
        add_date_property(&mut ics_event, "DTEND", event.date);

        cal.push(ics_event.done());
    }

    let cal = cal.done();

    // Post-process to remove unnecessary bloat from the icalendar
    // crate's output
    strip_ics_bloat(&cal.to_string())
}

/// Clean up ICS output from the icalendar crate
/// - Replace the crate's PRODID with our constant identifier
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
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

/// Add an all-day date property with the VALUE=DATE parameter
fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}
