//! Prompt assembly for the travel planner agent.

use itinera_core::trip::TripRequest;

// "March 10, 2025" - spelled-out dates keep the model from reordering
// day and month
const DATE_FORMAT: &str = "%B %d, %Y";

pub fn system_prompt(has_calendar: bool) -> String {
    let mut prompt = String::from(
        "You are a professional travel consultant who produces complete, \
         day-by-day travel itineraries.\n\n\
         Rules:\n\
         - Never ask questions; always deliver a finished itinerary.\n\
         - Research the destination with the available tools before writing.\n\
         - Structure the plan as \"Day 1: ...\", \"Day 2: ...\" and so on, \
         one section per trip day.\n\
         - Include accommodation options with prices, transportation with \
         timing, restaurant recommendations, a weather summary with packing \
         suggestions, local tips, and a cost breakdown against the budget.\n\
         - Use web search to find lodging options and current prices.\n",
    );

    if has_calendar {
        prompt.push_str(
            "- Create a calendar event for the departure and one for each day \
             of the trip, plus reminders for important bookings and check-ins.\n",
        );
    }

    prompt
}

pub fn trip_prompt(trip: &TripRequest) -> String {
    let start = trip.start_date.format(DATE_FORMAT);
    let end = trip.end_date.format(DATE_FORMAT);
    let num_days = trip.num_days();

    let preferences = if trip.preferences.is_empty() {
        "General sightseeing".to_string()
    } else {
        trip.preferences.join(", ")
    };

    let budget = if trip.budget == 0 {
        "not specified".to_string()
    } else {
        format!("${} USD", trip.budget)
    };

    format!(
        "Create a comprehensive travel itinerary.\n\n\
         Source: {source}\n\
         Destination: {destination}\n\
         Start date: {start}\n\
         End date: {end}\n\
         Duration: {num_days} days\n\
         Budget: {budget}\n\
         Preferences: {preferences}\n\
         Accommodation: {accommodation}\n\
         Transportation: {transportation}\n\
         Dietary restrictions: {dietary}\n\n\
         The trip runs from {start} to {end}: Day 1 is {start} and Day \
         {num_days} is {end}. Every date in the itinerary must match these \
         exact dates.",
        source = trip.source,
        destination = trip.destination,
        accommodation = trip.accommodation,
        transportation = trip.transportation,
        dietary = trip.dietary,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_trip() -> TripRequest {
        TripRequest {
            source: "Delhi".to_string(),
            destination: "Paris".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
            budget: 2000,
            preferences: vec!["Adventure".to_string(), "Food & Dining".to_string()],
            accommodation: "hotel".to_string(),
            transportation: "public transport".to_string(),
            dietary: "vegetarian".to_string(),
        }
    }

    #[test]
    fn trip_prompt_spells_out_the_dates() {
        let prompt = trip_prompt(&sample_trip());
        assert!(prompt.contains("Start date: March 10, 2025"));
        assert!(prompt.contains("End date: March 12, 2025"));
        assert!(prompt.contains("Duration: 3 days"));
        assert!(prompt.contains("Day 3 is March 12, 2025"));
    }

    #[test]
    fn trip_prompt_includes_every_field() {
        let prompt = trip_prompt(&sample_trip());
        assert!(prompt.contains("Destination: Paris"));
        assert!(prompt.contains("Budget: $2000 USD"));
        assert!(prompt.contains("Preferences: Adventure, Food & Dining"));
        assert!(prompt.contains("Dietary restrictions: vegetarian"));
    }

    #[test]
    fn empty_preferences_fall_back_to_sightseeing() {
        let mut trip = sample_trip();
        trip.preferences.clear();
        trip.budget = 0;

        let prompt = trip_prompt(&trip);
        assert!(prompt.contains("Preferences: General sightseeing"));
        assert!(prompt.contains("Budget: not specified"));
    }

    #[test]
    fn calendar_instructions_appear_only_when_available() {
        assert!(system_prompt(true).contains("calendar event"));
        assert!(!system_prompt(false).contains("calendar event"));
    }
}
