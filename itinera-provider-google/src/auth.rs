//! Interactive OAuth consent flow.
//!
//! Opens the Google consent page, receives the redirect on a one-shot
//! localhost listener, and exchanges the authorization code for tokens.
//! The refresh token goes back to the CLI for the user's config file;
//! nothing is stored on this side.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use itinera_core::protocol::{AuthenticatedAccount, OauthCredentials};

use crate::google;
use crate::session;

const CONSENT_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const SCOPE: &str = "https://www.googleapis.com/auth/calendar";

const REDIRECT_PORT: u16 = 8085;

fn redirect_uri() -> String {
    format!("http://localhost:{}/callback", REDIRECT_PORT)
}

fn redirect_address() -> String {
    format!("127.0.0.1:{}", REDIRECT_PORT)
}

pub async fn authenticate(creds: &OauthCredentials) -> Result<AuthenticatedAccount> {
    let state = uuid::Uuid::new_v4().to_string();
    let auth_url = consent_url(creds, &state)?;

    eprintln!("\nOpen this URL in your browser to authenticate:\n");
    eprintln!("{}\n", auth_url);

    // Try to open the browser automatically
    if open::that(auth_url.as_str()).is_err() {
        eprintln!("(Could not open browser automatically, please copy the URL above)");
    }

    let (code, callback_state) = wait_for_callback().await?;

    if callback_state != state {
        anyhow::bail!("OAuth state mismatch in callback");
    }

    eprintln!("\nReceived authorization code, exchanging for tokens...");

    let tokens = session::exchange_code(creds, &code, &redirect_uri()).await?;

    // The primary calendar's id is the account email
    let account = google::primary_account(&tokens.access_token).await?;

    eprintln!("Authentication successful!");

    Ok(AuthenticatedAccount {
        account,
        refresh_token: tokens.refresh_token,
    })
}

/// Consent URL with offline access, so the token exchange yields a
/// refresh token.
fn consent_url(creds: &OauthCredentials, state: &str) -> Result<url::Url> {
    let mut consent = url::Url::parse(CONSENT_URL)?;

    consent
        .query_pairs_mut()
        .append_pair("client_id", &creds.client_id)
        .append_pair("redirect_uri", &redirect_uri())
        .append_pair("response_type", "code")
        .append_pair("scope", SCOPE)
        .append_pair("access_type", "offline")
        .append_pair("prompt", "consent")
        .append_pair("state", state);

    Ok(consent)
}

/// Accept a single OAuth callback and pull `code` and `state` out of it.
async fn wait_for_callback() -> Result<(String, String)> {
    let listener = TcpListener::bind(redirect_address())
        .await
        .context("Failed to bind OAuth callback listener")?;

    let (stream, _) = listener
        .accept()
        .await
        .context("Failed to accept OAuth callback")?;

    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .await
        .context("Failed to read OAuth callback request line")?;

    let path = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Invalid HTTP request"))?;

    let callback = url::Url::parse(&format!("http://localhost{}", path))?;

    let code = query_value(&callback, "code")
        .ok_or_else(|| anyhow::anyhow!("No code in callback"))?;
    let state = query_value(&callback, "state")
        .ok_or_else(|| anyhow::anyhow!("No state in callback"))?;

    // Send a response to the browser
    let response = "HTTP/1.1 200 OK\r\n\
        Content-Type: text/html\r\n\
        Connection: close\r\n\
        \r\n\
        <html><body>\
        <h1>Authentication successful!</h1>\
        <p>You can close this window and return to the terminal.</p>\
        </body></html>";

    let mut stream = reader.into_inner();
    stream
        .write_all(response.as_bytes())
        .await
        .context("Failed to write OAuth callback response")?;
    stream.flush().await?;

    Ok((code, state))
}

fn query_value(callback: &url::Url, key: &str) -> Option<String> {
    callback
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consent_url_requests_offline_calendar_access() {
        let creds = OauthCredentials {
            client_id: "client-123".to_string(),
            client_secret: "secret".to_string(),
        };

        let consent = consent_url(&creds, "state-abc").unwrap();

        assert_eq!(consent.host_str(), Some("accounts.google.com"));
        assert_eq!(
            query_value(&consent, "client_id").as_deref(),
            Some("client-123")
        );
        assert_eq!(query_value(&consent, "scope").as_deref(), Some(SCOPE));
        assert_eq!(
            query_value(&consent, "access_type").as_deref(),
            Some("offline")
        );
        assert_eq!(query_value(&consent, "state").as_deref(), Some("state-abc"));
        // The client secret belongs in the token exchange, not the URL
        assert!(!consent.as_str().contains("secret"));
    }

    #[test]
    fn query_value_extracts_callback_parameters() {
        let callback =
            url::Url::parse("http://localhost:8085/callback?code=4%2Fabc&state=xyz").unwrap();
        assert_eq!(query_value(&callback, "code").as_deref(), Some("4/abc"));
        assert_eq!(query_value(&callback, "state").as_deref(), Some("xyz"));
        assert_eq!(query_value(&callback, "missing"), None);
    }
}
