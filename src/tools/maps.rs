//! Google Maps lookups: geocoding and directions.

use async_trait::async_trait;
use serde_json::{Value, json};

use super::Tool;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Resolve a place name to its formatted address and coordinates.
pub struct LocatePlace {
    http: reqwest::Client,
    api_key: String,
}

impl LocatePlace {
    pub fn new(api_key: String) -> Self {
        LocatePlace {
            http: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl Tool for LocatePlace {
    fn name(&self) -> &str {
        "locate_place"
    }

    fn description(&self) -> &str {
        "Look up a place by name and return its full address and coordinates."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "place": {
                    "type": "string",
                    "description": "Place name or address to look up"
                }
            },
            "required": ["place"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let place = args["place"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'place' argument"))?;

        let body: Value = self
            .http
            .get(GEOCODE_URL)
            .query(&[("address", place), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let status = body["status"].as_str().unwrap_or("UNKNOWN");
        if status != "OK" {
            return Ok(format!("Lookup failed for '{}': {}", place, status));
        }

        let result = &body["results"][0];
        let address = result["formatted_address"].as_str().unwrap_or(place);
        let location = &result["geometry"]["location"];

        Ok(format!(
            "{} ({}, {})",
            address, location["lat"], location["lng"]
        ))
    }
}

/// Distance and travel time between two places for a given mode.
pub struct GetDirections {
    http: reqwest::Client,
    api_key: String,
}

impl GetDirections {
    pub fn new(api_key: String) -> Self {
        GetDirections {
            http: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl Tool for GetDirections {
    fn name(&self) -> &str {
        "get_directions"
    }

    fn description(&self) -> &str {
        "Get the distance and travel time between two places. Use when \
         scheduling a day's activities or planning transfers."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "origin": {
                    "type": "string",
                    "description": "Starting place name or address"
                },
                "destination": {
                    "type": "string",
                    "description": "Ending place name or address"
                },
                "mode": {
                    "type": "string",
                    "enum": ["driving", "walking", "bicycling", "transit"],
                    "description": "Travel mode (default driving)"
                }
            },
            "required": ["origin", "destination"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let origin = args["origin"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'origin' argument"))?;
        let destination = args["destination"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'destination' argument"))?;
        let mode = args["mode"].as_str().unwrap_or("driving");

        let body: Value = self
            .http
            .get(DIRECTIONS_URL)
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("mode", mode),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let status = body["status"].as_str().unwrap_or("UNKNOWN");
        if status != "OK" {
            return Ok(format!(
                "No route found from '{}' to '{}': {}",
                origin, destination, status
            ));
        }

        // The first route's first leg covers a single origin/destination
        // request
        let leg = &body["routes"][0]["legs"][0];
        let distance = leg["distance"]["text"].as_str().unwrap_or("unknown");
        let duration = leg["duration"]["text"].as_str().unwrap_or("unknown");

        Ok(format!(
            "{} to {} by {}: {} ({})",
            origin, destination, mode, distance, duration
        ))
    }
}
