use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use itinera_core::generate_calendar;

pub fn run(input: Option<&Path>, start: Option<NaiveDate>, output: &Path) -> Result<()> {
    let plan_text = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read itinerary text from stdin")?;
            buffer
        }
    };

    let ics = generate_calendar(&plan_text, start);

    std::fs::write(output, &ics)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("{}", format!("Wrote {}", output.display()).green());

    Ok(())
}
