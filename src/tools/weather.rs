//! Weather forecasts via the AccuWeather API.

use async_trait::async_trait;
use serde_json::{Value, json};

use super::Tool;

const LOCATIONS_URL: &str = "https://dataservice.accuweather.com/locations/v1/cities/search";
const FORECAST_URL: &str = "https://dataservice.accuweather.com/forecasts/v1/daily/5day";

pub struct GetForecast {
    http: reqwest::Client,
    api_key: String,
}

impl GetForecast {
    pub fn new(api_key: String) -> Self {
        GetForecast {
            http: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl Tool for GetForecast {
    fn name(&self) -> &str {
        "get_forecast"
    }

    fn description(&self) -> &str {
        "Get the 5-day weather forecast for a city. Use it for packing \
         suggestions and outdoor-activity planning."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "City name, optionally with country"
                }
            },
            "required": ["location"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let location = args["location"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'location' argument"))?;

        // AccuWeather needs a location key before it serves a forecast
        let locations: Value = self
            .http
            .get(LOCATIONS_URL)
            .query(&[("apikey", self.api_key.as_str()), ("q", location)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(city) = locations.as_array().and_then(|cities| cities.first()) else {
            return Ok(format!("No location found for: {}", location));
        };

        let key = city["Key"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Location result without a key"))?;
        let name = city["LocalizedName"].as_str().unwrap_or(location);

        let forecast: Value = self
            .http
            .get(format!("{}/{}", FORECAST_URL, key))
            .query(&[("apikey", self.api_key.as_str()), ("metric", "true")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut lines = vec![format!("5-day forecast for {}:", name)];

        if let Some(headline) = forecast["Headline"]["Text"].as_str() {
            lines.push(headline.to_string());
        }

        if let Some(days) = forecast["DailyForecasts"].as_array() {
            for day in days {
                let date = day["Date"].as_str().unwrap_or("").split('T').next().unwrap_or("");
                let min = &day["Temperature"]["Minimum"]["Value"];
                let max = &day["Temperature"]["Maximum"]["Value"];
                let daytime = day["Day"]["IconPhrase"].as_str().unwrap_or("");
                lines.push(format!("{}: {}..{}°C, {}", date, min, max, daytime));
            }
        }

        Ok(lines.join("\n"))
    }
}
