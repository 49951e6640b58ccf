//! Day-section extraction and event synthesis.
//!
//! Free-form itinerary text is scanned for "Day <n>" markers; each
//! section becomes one all-day event dated relative to the trip start.
//! Text without any marker collapses into a single whole-text event, so
//! every input produces a calendar.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use regex::Regex;

use crate::event::ItineraryEvent;
use crate::ics;

/// Start of a day section: "Day", digits, then at least one colon or
/// whitespace character. Case-sensitive.
static DAY_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Day (\d+)[:\s]+").unwrap());

/// Where a section's content stops: any later "Day <digits>", whether or
/// not a separator follows it.
static DAY_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Day \d+").unwrap());

/// One matched "Day <n>" section of the plan text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySection<'a> {
    pub number: i64,
    /// Raw slice between this marker and the next; not yet trimmed.
    pub content: &'a str,
}

/// Scan `plan_text` for non-overlapping day sections, in text order.
///
/// A section's content runs from just past its marker to the next
/// "Day <digits>" occurrence or the end of the text, so it may span any
/// number of lines. Day numbers are taken as written: duplicates and
/// out-of-range values are kept, nothing is sorted or merged.
pub fn parse_day_sections(plan_text: &str) -> Vec<DaySection<'_>> {
    let mut sections = Vec::new();
    let mut pos = 0;

    while let Some(caps) = DAY_MARKER.captures_at(plan_text, pos) {
        // The capture is all digits, so parsing only fails on overflow;
        // clamp instead of panicking.
        let number: i64 = caps[1].parse().unwrap_or(i64::MAX);

        let content_start = caps.get(0).map(|m| m.end()).unwrap_or(plan_text.len());
        let content_end = DAY_BOUNDARY
            .find_at(plan_text, content_start)
            .map(|boundary| boundary.start())
            .unwrap_or(plan_text.len());

        sections.push(DaySection {
            number,
            content: &plan_text[content_start..content_end],
        });

        pos = content_end;
    }

    sections
}

/// Synthesize one event per day section, or a single whole-text fallback
/// event when the text contains no markers. Cannot fail, whatever the
/// input.
pub fn plan_to_events(
    plan_text: &str,
    start_date: NaiveDate,
    stamp: DateTime<Utc>,
) -> Vec<ItineraryEvent> {
    let sections = parse_day_sections(plan_text);

    if sections.is_empty() {
        // Fallback: the whole text verbatim, dated at the trip start
        return vec![ItineraryEvent {
            uid: event_uid(stamp, 0),
            summary: "Travel Itinerary".to_string(),
            description: plan_text.to_string(),
            date: start_date,
            stamp,
        }];
    }

    sections
        .iter()
        .enumerate()
        .map(|(index, section)| ItineraryEvent {
            uid: event_uid(stamp, index),
            summary: format!("Day {} Itinerary", section.number),
            description: section.content.trim().to_string(),
            date: offset_date(start_date, section.number),
            stamp,
        })
        .collect()
}

/// Generate an iCalendar byte payload from a travel itinerary text.
///
/// `start_date` anchors "Day 1" and defaults to today's local date. Day
/// numbers are not validated against the trip length: "Day 0" lands the
/// day before the start, a day past the trip end lands past the end.
pub fn generate_calendar(plan_text: &str, start_date: Option<NaiveDate>) -> Vec<u8> {
    let start = start_date.unwrap_or_else(|| Local::now().date_naive());
    let events = plan_to_events(plan_text, start, Utc::now());
    ics::generate_ics(&events).into_bytes()
}

/// `start + (day - 1)` days. Values outside the representable date range
/// clamp to the start date; the exporter never fails on absurd input.
fn offset_date(start: NaiveDate, day: i64) -> NaiveDate {
    Duration::try_days(day.saturating_sub(1))
        .and_then(|offset| start.checked_add_signed(offset))
        .unwrap_or(start)
}

/// Deterministic per-run UID: same clock and position, same UID.
fn event_uid(stamp: DateTime<Utc>, index: usize) -> String {
    format!("{}-{}@itinera", stamp.timestamp(), index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    // --- parse_day_sections ---

    #[test]
    fn sections_in_text_order() {
        let text = "Day 1: Arrive and settle in.\nDay 2: City tour.\nDay 3: Departure.";
        let sections = parse_day_sections(text);

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].number, 1);
        assert_eq!(sections[0].content, "Arrive and settle in.\n");
        assert_eq!(sections[1].number, 2);
        assert_eq!(sections[1].content, "City tour.\n");
        assert_eq!(sections[2].number, 3);
        assert_eq!(sections[2].content, "Departure.");
    }

    #[test]
    fn no_markers_yields_no_sections() {
        assert!(parse_day_sections("Just relax, no structured plan.").is_empty());
        assert!(parse_day_sections("").is_empty());
    }

    #[test]
    fn day_without_digits_is_not_a_marker() {
        assert!(parse_day_sections("Day Trip to the coast.").is_empty());
    }

    #[test]
    fn day_word_inside_section_is_plain_content() {
        let sections = parse_day_sections("Day 1: Day Trip to the coast.");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "Day Trip to the coast.");
    }

    #[test]
    fn marker_without_separator_ends_content_but_opens_no_section() {
        // "Day 2" at the very end has no colon or whitespace after the
        // digits, so it terminates Day 1 without starting a section.
        let sections = parse_day_sections("Day 1: museum visit Day 2");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].number, 1);
        assert_eq!(sections[0].content, "museum visit ");
    }

    #[test]
    fn back_to_back_markers_give_empty_content() {
        let sections = parse_day_sections("Day 1:\nDay 2: Beach.");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].content, "");
        assert_eq!(sections[1].content, "Beach.");
    }

    #[test]
    fn content_spans_multiple_lines() {
        let text = "Day 1: Morning at the museum.\nEvening food market.\nDay 2: Hike.";
        let sections = parse_day_sections(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(
            sections[0].content,
            "Morning at the museum.\nEvening food market.\n"
        );
    }

    #[test]
    fn duplicate_day_numbers_are_kept() {
        let sections = parse_day_sections("Day 2: Beach.\nDay 2: Beach again.");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].number, 2);
        assert_eq!(sections[1].number, 2);
    }

    #[test]
    fn lowercase_day_is_ignored() {
        assert!(parse_day_sections("day 1: not a marker").is_empty());
    }

    // --- plan_to_events ---

    #[test]
    fn three_day_scenario() {
        let text = "Day 1: Arrive and settle in.\nDay 2: City tour.\nDay 3: Departure.";
        let events = plan_to_events(text, date(2025, 3, 10), stamp());

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].summary, "Day 1 Itinerary");
        assert_eq!(events[0].description, "Arrive and settle in.");
        assert_eq!(events[0].date, date(2025, 3, 10));
        assert_eq!(events[1].description, "City tour.");
        assert_eq!(events[1].date, date(2025, 3, 11));
        assert_eq!(events[2].description, "Departure.");
        assert_eq!(events[2].date, date(2025, 3, 12));
    }

    #[test]
    fn fallback_event_for_unstructured_text() {
        let text = "Just relax, no structured plan.";
        let events = plan_to_events(text, date(2025, 3, 10), stamp());

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Travel Itinerary");
        assert_eq!(events[0].description, text);
        assert_eq!(events[0].date, date(2025, 3, 10));
    }

    #[test]
    fn fallback_description_is_verbatim() {
        // Day-section descriptions are trimmed; the fallback is not.
        let text = "  surrounded by whitespace  ";
        let events = plan_to_events(text, date(2025, 3, 10), stamp());
        assert_eq!(events[0].description, text);
    }

    #[test]
    fn empty_text_still_yields_one_event() {
        let events = plan_to_events("", date(2025, 3, 10), stamp());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Travel Itinerary");
        assert_eq!(events[0].description, "");
    }

    #[test]
    fn duplicate_days_share_a_date_without_merging() {
        let events = plan_to_events(
            "Day 2: Beach.\nDay 2: Beach again.",
            date(2025, 6, 1),
            stamp(),
        );

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].date, date(2025, 6, 2));
        assert_eq!(events[1].date, date(2025, 6, 2));
        assert_eq!(events[0].description, "Beach.");
        assert_eq!(events[1].description, "Beach again.");
    }

    #[test]
    fn day_zero_lands_before_the_trip_start() {
        let events = plan_to_events("Day 0: Pre-trip prep.", date(2025, 1, 5), stamp());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, date(2025, 1, 4));
    }

    #[test]
    fn day_beyond_trip_length_is_accepted() {
        let events = plan_to_events("Day 30: Bonus day.", date(2025, 1, 1), stamp());
        assert_eq!(events[0].date, date(2025, 1, 30));
    }

    #[test]
    fn absurd_day_number_clamps_to_start() {
        let events = plan_to_events(
            "Day 99999999999999999999: Far future.",
            date(2025, 1, 5),
            stamp(),
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, date(2025, 1, 5));
    }

    #[test]
    fn events_carry_the_generation_stamp() {
        let events = plan_to_events("Day 1: Arrival.", date(2025, 3, 10), stamp());
        assert_eq!(events[0].stamp, stamp());
    }

    #[test]
    fn uids_are_deterministic_for_a_fixed_stamp() {
        let a = plan_to_events("Day 1: A.\nDay 2: B.", date(2025, 3, 10), stamp());
        let b = plan_to_events("Day 1: A.\nDay 2: B.", date(2025, 3, 10), stamp());
        assert_eq!(a, b);
        assert_ne!(a[0].uid, a[1].uid);
    }

    // --- generate_calendar ---

    #[test]
    fn generate_calendar_never_fails_on_arbitrary_text() {
        for text in ["", "\0\u{1}\u{2}", "Day", "Day :", "🏖️ Day 1: beach"] {
            let bytes = generate_calendar(text, Some(date(2025, 3, 10)));
            let payload = String::from_utf8(bytes).unwrap();
            assert!(payload.starts_with("BEGIN:VCALENDAR"));
            assert!(payload.contains("BEGIN:VEVENT"));
        }
    }
}
