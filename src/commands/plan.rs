use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use itinera_core::protocol::OauthCredentials;
use itinera_core::trip::TripRequest;

use crate::agent::Planner;
use crate::config::Config;
use crate::llm::OpenAiClient;
use crate::tools::{
    CreateCalendarEvent, GetDirections, GetForecast, LocatePlace, SearchWeb, ToolRegistry,
};

pub async fn run(trip: TripRequest, output: Option<PathBuf>) -> Result<()> {
    if trip.destination.trim().is_empty() {
        anyhow::bail!("Please provide a destination");
    }
    if trip.end_date < trip.start_date {
        anyhow::bail!("End date must not be before the start date");
    }

    let config = Config::load()?;
    config.require_openai_key()?;

    let tools = build_registry(&config);
    let llm = OpenAiClient::new(config.openai.api_key.clone(), config.openai.model.clone());
    let planner = Planner::new(llm, tools);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(format!(
        "Creating your {}-day travel plan for {}...",
        trip.num_days(),
        trip.destination
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let itinerary = planner.plan(&trip).await;
    spinner.finish_and_clear();
    let itinerary = itinerary?;

    match output {
        Some(path) => {
            std::fs::write(&path, &itinerary)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            println!(
                "{}",
                format!("Itinerary written to {}", path.display()).green()
            );
            println!(
                "\nExport it as a calendar file with:\n  \
                itinera export --input {} --start {}",
                path.display(),
                trip.start_date
            );
        }
        None => {
            println!("{itinerary}");
            eprintln!(
                "\n{}",
                format!(
                    "Pipe this into `itinera export --start {}` for a calendar file.",
                    trip.start_date
                )
                .dimmed()
            );
        }
    }

    Ok(())
}

/// Register every tool whose credentials are configured, noting the ones
/// that are skipped.
fn build_registry(config: &Config) -> ToolRegistry {
    let mut tools = ToolRegistry::new();

    if config.tavily.api_key.is_empty() {
        eprintln!("Note: no Tavily API key configured; web search is disabled.");
    } else {
        tools.register(Box::new(SearchWeb::new(config.tavily.api_key.clone())));
    }

    if config.google_maps.api_key.is_empty() {
        eprintln!("Note: no Google Maps API key configured; place lookups are disabled.");
    } else {
        tools.register(Box::new(LocatePlace::new(config.google_maps.api_key.clone())));
        tools.register(Box::new(GetDirections::new(
            config.google_maps.api_key.clone(),
        )));
    }

    if config.accuweather.api_key.is_empty() {
        eprintln!("Note: no AccuWeather API key configured; forecasts are disabled.");
    } else {
        tools.register(Box::new(GetForecast::new(config.accuweather.api_key.clone())));
    }

    if config.has_calendar_credentials() {
        tools.register(Box::new(CreateCalendarEvent::new(
            OauthCredentials {
                client_id: config.calendar.client_id.clone(),
                client_secret: config.calendar.client_secret.clone(),
            },
            config.calendar.refresh_token.clone(),
            config.calendar.time_zone.clone(),
        )));
    } else {
        eprintln!(
            "Note: no Google Calendar credentials configured; \
            run `itinera auth google` to set them up."
        );
    }

    tools
}
