//! Configuration and credentials.
//!
//! All keys live in one explicit `Config` value constructed at the CLI
//! edge: file values from ~/.config/itinera/config.toml, overridden by
//! the conventional environment variables. Nothing below this layer
//! reads the process environment; collaborators receive what they need
//! by construction.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub tavily: TavilyConfig,
    pub google_maps: GoogleMapsConfig,
    pub accuweather: AccuWeatherConfig,
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        OpenAiConfig {
            api_key: String::new(),
            model: default_model(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TavilyConfig {
    pub api_key: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GoogleMapsConfig {
    pub api_key: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccuWeatherConfig {
    pub api_key: String,
}

/// Google Calendar OAuth parameters plus the time zone remote events are
/// created in.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub time_zone: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            client_id: String::new(),
            client_secret: String::new(),
            refresh_token: String::new(),
            time_zone: default_time_zone(),
        }
    }
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("itinera");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config: Config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        override_from_env(&mut self.openai.api_key, "OPENAI_API_KEY");
        override_from_env(&mut self.openai.model, "OPENAI_MODEL");
        override_from_env(&mut self.tavily.api_key, "TAVILY_API_KEY");
        override_from_env(&mut self.google_maps.api_key, "GOOGLE_MAPS_API_KEY");
        override_from_env(&mut self.accuweather.api_key, "ACCUWEATHER_API_KEY");
        override_from_env(&mut self.calendar.client_id, "GOOGLE_CLIENT_ID");
        override_from_env(&mut self.calendar.client_secret, "GOOGLE_CLIENT_SECRET");
        override_from_env(&mut self.calendar.refresh_token, "GOOGLE_REFRESH_TOKEN");
    }

    /// All three OAuth values needed to write to the calendar.
    pub fn has_calendar_credentials(&self) -> bool {
        !self.calendar.client_id.is_empty()
            && !self.calendar.client_secret.is_empty()
            && !self.calendar.refresh_token.is_empty()
    }

    pub fn require_openai_key(&self) -> Result<()> {
        if self.openai.api_key.is_empty() {
            let path = Self::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "~/.config/itinera/config.toml".to_string());
            anyhow::bail!(
                "No OpenAI API key configured.\n\n\
                Set OPENAI_API_KEY, or add to {}:\n  \
                [openai]\n  \
                api_key = \"sk-...\"",
                path
            );
        }
        Ok(())
    }
}

fn override_from_env(field: &mut String, var: &str) {
    if let Ok(value) = std::env::var(var) {
        if !value.is_empty() {
            *field = value;
        }
    }
}
