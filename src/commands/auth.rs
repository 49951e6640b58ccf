use anyhow::Result;
use owo_colors::OwoColorize;

use itinera_core::protocol::{AuthenticateParams, AuthenticatedAccount, Command, OauthCredentials};
use itinera_core::provider::Provider;

use crate::config::Config;

pub async fn run(provider_name: &str) -> Result<()> {
    let config = Config::load()?;

    if config.calendar.client_id.is_empty() || config.calendar.client_secret.is_empty() {
        anyhow::bail!(
            "Google OAuth client credentials are not configured.\n\n\
            Set GOOGLE_CLIENT_ID and GOOGLE_CLIENT_SECRET, or add to {}:\n  \
            [calendar]\n  \
            client_id = \"...\"\n  \
            client_secret = \"...\"",
            Config::config_path()?.display()
        );
    }

    let provider = Provider::from_name(provider_name);

    println!("Authenticating with {provider_name}...");

    let params = AuthenticateParams {
        credentials: OauthCredentials {
            client_id: config.calendar.client_id.clone(),
            client_secret: config.calendar.client_secret.clone(),
        },
    };

    // No timeout wrapper: the flow waits on the user's browser
    let account: AuthenticatedAccount = provider
        .call(Command::Authenticate, serde_json::to_value(&params)?)
        .await?;

    println!(
        "\n{}",
        format!("Authenticated as: {}", account.account).green()
    );
    println!(
        "\nAdd the refresh token to {}:",
        Config::config_path()?.display()
    );
    println!("  [calendar]");
    println!("  refresh_token = \"{}\"", account.refresh_token);
    println!("\n(or set GOOGLE_REFRESH_TOKEN in the environment)");

    Ok(())
}
