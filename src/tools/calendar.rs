//! Calendar-write tool: bridges the agent to a provider binary.

use async_trait::async_trait;
use serde_json::{Value, json};

use itinera_core::protocol::{Command, CreateEventParams, CreatedEvent, OauthCredentials};
use itinera_core::provider::Provider;

use super::Tool;

pub struct CreateCalendarEvent {
    provider: Provider,
    credentials: OauthCredentials,
    refresh_token: String,
    time_zone: String,
}

impl CreateCalendarEvent {
    pub fn new(credentials: OauthCredentials, refresh_token: String, time_zone: String) -> Self {
        CreateCalendarEvent {
            provider: Provider::from_name("google"),
            credentials,
            refresh_token,
            time_zone,
        }
    }
}

#[async_trait]
impl Tool for CreateCalendarEvent {
    fn name(&self) -> &str {
        "create_calendar_event"
    }

    fn description(&self) -> &str {
        "Create an event on the user's calendar. Use it for the departure, \
         for each day of the trip, and for booking or check-in reminders."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "summary": {
                    "type": "string",
                    "description": "Event title"
                },
                "start_time": {
                    "type": "string",
                    "description": "Start as a local timestamp, e.g. 2025-03-10T09:00:00"
                },
                "end_time": {
                    "type": "string",
                    "description": "End, same format as start_time"
                },
                "description": {
                    "type": "string",
                    "description": "Optional event details"
                },
                "location": {
                    "type": "string",
                    "description": "Optional place name or address"
                }
            },
            "required": ["summary", "start_time", "end_time"]
        })
    }

    /// Success and failure both come back as plain strings: the model
    /// sees what a user would, never an aborted run.
    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let summary = args["summary"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'summary' argument"))?;
        let start_time = args["start_time"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'start_time' argument"))?;
        let end_time = args["end_time"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'end_time' argument"))?;

        let params = CreateEventParams {
            credentials: self.credentials.clone(),
            refresh_token: self.refresh_token.clone(),
            time_zone: self.time_zone.clone(),
            summary: summary.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            description: args["description"].as_str().map(str::to_string),
            location: args["location"].as_str().map(str::to_string),
        };

        let result: Result<CreatedEvent, _> = self
            .provider
            .call_with_timeout(Command::CreateEvent, serde_json::to_value(&params)?)
            .await;

        Ok(match result {
            Ok(event) => format!("Calendar event created: {}", event.html_link),
            Err(e) => format!("Failed to create calendar event: {}", e),
        })
    }
}
