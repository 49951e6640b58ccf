//! Google Calendar v3 REST calls.

use anyhow::{Context, Result};
use serde_json::{Value, json};

use itinera_core::protocol::{CreateEventParams, CreatedEvent};

use crate::session;

const EVENTS_URL: &str = "https://www.googleapis.com/calendar/v3/calendars/primary/events";
const CALENDAR_LIST_URL: &str = "https://www.googleapis.com/calendar/v3/users/me/calendarList";

/// Create an event on the account's primary calendar and return a link
/// to it.
pub async fn create_event(params: &CreateEventParams) -> Result<CreatedEvent> {
    let token = session::access_token(&params.credentials, &params.refresh_token).await?;

    let response = reqwest::Client::new()
        .post(EVENTS_URL)
        .bearer_auth(&token)
        .json(&event_body(params))
        .send()
        .await
        .context("Failed to reach the Google Calendar API")?;

    if !response.status().is_success() {
        let status = response.status();
        let detail = response.text().await.unwrap_or_default();
        anyhow::bail!("Event creation failed ({}): {}", status, detail);
    }

    let created: Value = response
        .json()
        .await
        .context("Failed to parse event creation response")?;

    Ok(CreatedEvent {
        html_link: created["htmlLink"].as_str().unwrap_or_default().to_string(),
    })
}

/// Build the events.insert request body.
fn event_body(params: &CreateEventParams) -> Value {
    let mut body = json!({
        "summary": params.summary,
        "start": { "dateTime": params.start_time, "timeZone": params.time_zone },
        "end": { "dateTime": params.end_time, "timeZone": params.time_zone },
    });

    if let Some(ref description) = params.description {
        body["description"] = json!(description);
    }
    if let Some(ref location) = params.location {
        body["location"] = json!(location);
    }

    body
}

/// The id (email) of the account's primary calendar.
pub async fn primary_account(access_token: &str) -> Result<String> {
    let response = reqwest::Client::new()
        .get(CALENDAR_LIST_URL)
        .bearer_auth(access_token)
        .send()
        .await
        .context("Failed to reach the Google Calendar API")?;

    if !response.status().is_success() {
        let detail = response.text().await.unwrap_or_default();
        anyhow::bail!("Calendar list failed: {}", detail);
    }

    let list: Value = response
        .json()
        .await
        .context("Failed to parse calendar list")?;

    list["items"]
        .as_array()
        .and_then(|items| {
            items
                .iter()
                .find(|calendar| calendar["primary"].as_bool() == Some(true))
        })
        .and_then(|calendar| calendar["id"].as_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("No primary calendar found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use itinera_core::protocol::OauthCredentials;

    fn params() -> CreateEventParams {
        CreateEventParams {
            credentials: OauthCredentials {
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
            },
            refresh_token: "refresh".to_string(),
            time_zone: "Asia/Kolkata".to_string(),
            summary: "Day 1: Arrival".to_string(),
            start_time: "2025-03-10T09:00:00".to_string(),
            end_time: "2025-03-10T10:00:00".to_string(),
            description: None,
            location: None,
        }
    }

    #[test]
    fn event_body_carries_times_with_the_time_zone() {
        let body = event_body(&params());

        assert_eq!(body["summary"], "Day 1: Arrival");
        assert_eq!(body["start"]["dateTime"], "2025-03-10T09:00:00");
        assert_eq!(body["start"]["timeZone"], "Asia/Kolkata");
        assert_eq!(body["end"]["timeZone"], "Asia/Kolkata");
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let body = event_body(&params());
        assert!(body.get("description").is_none());
        assert!(body.get("location").is_none());
    }

    #[test]
    fn optional_fields_are_sent_when_present() {
        let mut p = params();
        p.description = Some("Flight details".to_string());
        p.location = Some("IGI Airport, Delhi".to_string());

        let body = event_body(&p);
        assert_eq!(body["description"], "Flight details");
        assert_eq!(body["location"], "IGI Airport, Delhi");
    }

    // The credentials never appear in the event payload; they only feed
    // the token exchange.
    #[test]
    fn event_body_never_leaks_credentials() {
        let body = event_body(&params()).to_string();
        assert!(!body.contains("secret"));
        assert!(!body.contains("refresh"));
    }
}
