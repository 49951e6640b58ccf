//! Trip parameters collected from the user.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything the itinerary agent needs to know about the requested trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    pub source: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Total budget in USD. Zero means no stated budget.
    pub budget: u32,
    /// Free-form preference tags ("Adventure", "Food & Dining", ...).
    pub preferences: Vec<String>,
    pub accommodation: String,
    pub transportation: String,
    pub dietary: String,
}

impl TripRequest {
    /// Inclusive trip length: a same-day trip is one day.
    pub fn num_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(start: NaiveDate, end: NaiveDate) -> TripRequest {
        TripRequest {
            source: "Delhi".to_string(),
            destination: "Paris".to_string(),
            start_date: start,
            end_date: end,
            budget: 2000,
            preferences: vec![],
            accommodation: "any".to_string(),
            transportation: "any".to_string(),
            dietary: "none".to_string(),
        }
    }

    #[test]
    fn num_days_is_inclusive() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(trip(start, end).num_days(), 5);
    }

    #[test]
    fn same_day_trip_is_one_day() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(trip(day, day).num_days(), 1);
    }
}
