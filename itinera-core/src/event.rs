//! The event model synthesized from itinerary text.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An all-day calendar event derived from one day of an itinerary (or
/// from the whole text, for the fallback event).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryEvent {
    /// Derived from the generation stamp and the event's position in the
    /// text, never random: the same inputs and clock give the same UID.
    pub uid: String,
    pub summary: String,
    pub description: String,
    /// All-day date; the event ends the same day it starts.
    pub date: NaiveDate,
    /// Generation timestamp (DTSTAMP), distinct from the event date.
    pub stamp: DateTime<Utc>,
}
