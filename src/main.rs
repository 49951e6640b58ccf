mod agent;
mod commands;
mod config;
mod llm;
mod tools;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use itinera_core::trip::TripRequest;

#[derive(Parser)]
#[command(name = "itinera")]
#[command(about = "Plan trips with an AI travel agent and export them to your calendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a day-by-day itinerary for a trip
    Plan {
        /// Departure city
        #[arg(long)]
        source: String,

        /// Destination city
        #[arg(long)]
        destination: String,

        /// First day of the trip (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last day of the trip (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,

        /// Total budget in USD (0 = unspecified)
        #[arg(long, default_value_t = 0)]
        budget: u32,

        /// Preference tag, repeatable (e.g. --preference Adventure)
        #[arg(long = "preference")]
        preferences: Vec<String>,

        /// Preferred accommodation (hotel, hostel, airbnb, resort, any)
        #[arg(long, default_value = "any")]
        accommodation: String,

        /// Preferred transportation (public transport, rental car, ...)
        #[arg(long, default_value = "any")]
        transportation: String,

        /// Dietary restrictions
        #[arg(long, default_value = "none")]
        dietary: String,

        /// Write the itinerary to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert itinerary text into an .ics calendar file
    Export {
        /// Itinerary text file; "-" or omitted reads stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Date of Day 1 (YYYY-MM-DD); defaults to today
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Where to write the calendar file
        #[arg(short, long, default_value = "travel_itinerary.ics")]
        output: PathBuf,
    },
    /// Run a calendar provider's OAuth flow and mint a refresh token
    Auth {
        /// Provider name, e.g. "google"
        provider: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            source,
            destination,
            start,
            end,
            budget,
            preferences,
            accommodation,
            transportation,
            dietary,
            output,
        } => {
            let trip = TripRequest {
                source,
                destination,
                start_date: start,
                end_date: end,
                budget,
                preferences,
                accommodation,
                transportation,
                dietary,
            };
            commands::plan::run(trip, output).await
        }
        Commands::Export {
            input,
            start,
            output,
        } => commands::export::run(input.as_deref(), start, &output),
        Commands::Auth { provider } => commands::auth::run(&provider).await,
    }
}
