//! Token exchanges against the Google OAuth endpoint.
//!
//! Two flows share the endpoint: minting an access token from a stored
//! refresh token (every `create_event` call), and trading an
//! authorization code for the initial token pair (the consent flow).

use anyhow::{Context, Result};
use serde::Deserialize;

use itinera_core::protocol::OauthCredentials;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Exchange a refresh token for a fresh access token.
pub async fn access_token(creds: &OauthCredentials, refresh_token: &str) -> Result<String> {
    #[derive(Deserialize)]
    struct TokenResponse {
        access_token: String,
    }

    let response = reqwest::Client::new()
        .post(TOKEN_URL)
        .form(&[
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ])
        .send()
        .await
        .context("Failed to reach the Google token endpoint")?;

    if !response.status().is_success() {
        let detail = response.text().await.unwrap_or_default();
        anyhow::bail!("Token refresh failed: {}", detail);
    }

    let tokens: TokenResponse = response
        .json()
        .await
        .context("Failed to parse token response")?;

    Ok(tokens.access_token)
}

pub struct CodeTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Exchange an authorization code for tokens after the consent flow.
pub async fn exchange_code(
    creds: &OauthCredentials,
    code: &str,
    redirect_uri: &str,
) -> Result<CodeTokens> {
    #[derive(Deserialize)]
    struct CodeTokenResponse {
        access_token: String,
        #[serde(default)]
        refresh_token: String,
    }

    let response = reqwest::Client::new()
        .post(TOKEN_URL)
        .form(&[
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .context("Failed to reach the Google token endpoint")?;

    if !response.status().is_success() {
        let detail = response.text().await.unwrap_or_default();
        anyhow::bail!("Code exchange failed: {}", detail);
    }

    let tokens: CodeTokenResponse = response
        .json()
        .await
        .context("Failed to parse token response")?;

    // Google only returns a refresh token on a fresh consent
    if tokens.refresh_token.is_empty() {
        anyhow::bail!(
            "Google did not return a refresh token; revoke the app's access \
            under https://myaccount.google.com/permissions and authenticate again"
        );
    }

    Ok(CodeTokens {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    })
}
