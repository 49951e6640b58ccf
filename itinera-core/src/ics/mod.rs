//! ICS serialization of itinerary events.

pub mod generate;

pub use generate::generate_ics;
