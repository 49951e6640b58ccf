//! Provider protocol types.
//!
//! Defines the JSON protocol spoken between the itinera CLI and calendar
//! provider binaries over stdin/stdout. Credentials travel inside the
//! request params: providers keep no configuration of their own.

use serde::{Deserialize, Serialize};

/// Commands that providers must implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Authenticate,
    CreateEvent,
}

/// Request sent from the CLI to a provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from a provider to the CLI.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap()
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::to_string(&Response::<()>::Error {
            error: msg.to_string(),
        })
        .unwrap()
    }
}

/// OAuth client credentials, forwarded verbatim from the CLI config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OauthCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Params for `authenticate`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthenticateParams {
    pub credentials: OauthCredentials,
}

/// Data returned by `authenticate`: the minted refresh token and the
/// account it belongs to.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthenticatedAccount {
    pub account: String,
    pub refresh_token: String,
}

/// Params for `create_event`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEventParams {
    pub credentials: OauthCredentials,
    pub refresh_token: String,
    /// IANA time zone the start/end timestamps are interpreted in.
    pub time_zone: String,
    pub summary: String,
    /// Local timestamp without offset, e.g. "2025-03-10T09:00:00".
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Data returned by `create_event`: a link to the created event.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedEvent {
    pub html_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_snake_case_on_the_wire() {
        let json = serde_json::to_string(&Command::CreateEvent).unwrap();
        assert_eq!(json, r#""create_event""#);

        let parsed: Command = serde_json::from_str(r#""authenticate""#).unwrap();
        assert_eq!(parsed, Command::Authenticate);
    }

    #[test]
    fn request_params_default_to_null() {
        let request: Request = serde_json::from_str(r#"{"command":"create_event"}"#).unwrap();
        assert_eq!(request.command, Command::CreateEvent);
        assert!(request.params.is_null());
    }

    #[test]
    fn response_is_tagged_by_status() {
        let success = Response::success("done");
        assert_eq!(success, r#"{"status":"success","data":"done"}"#);

        let error = Response::error("boom");
        assert_eq!(error, r#"{"status":"error","error":"boom"}"#);

        let parsed: Response<String> = serde_json::from_str(&success).unwrap();
        assert!(matches!(parsed, Response::Success { data } if data == "done"));
    }

    #[test]
    fn create_event_params_round_trip() {
        let params = CreateEventParams {
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
            location: Some("Delhi".to_string()),
        };

        let json = serde_json::to_value(&params).unwrap();
        // Absent optionals stay off the wire entirely
        assert!(json.get("description").is_none());

        let back: CreateEventParams = serde_json::from_value(json).unwrap();
        assert_eq!(back.summary, params.summary);
        assert_eq!(back.location.as_deref(), Some("Delhi"));
        assert!(back.description.is_none());
    }
}
