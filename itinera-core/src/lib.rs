//! Core types for the itinera ecosystem.
//!
//! This crate provides the pieces shared by the itinera CLI and its
//! calendar providers:
//! - the itinerary parser and calendar exporter (`itinerary`, `ics`)
//! - `protocol` and `provider` for the CLI-provider communication
//! - `trip` for the parameters a planning run starts from

pub mod error;
pub mod event;
pub mod ics;
pub mod itinerary;
pub mod protocol;
pub mod provider;
pub mod trip;

pub use error::{ItineraError, ItineraResult};
pub use event::ItineraryEvent;
pub use itinerary::generate_calendar;
pub use trip::TripRequest;
