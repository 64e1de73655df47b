//! Open-Meteo adapter (weather queries only)
//!
//! Only consulted when the query actually mentions weather; everything else
//! passes straight through to the next link in the knowledge chain.

use crate::models::Snippet;
use crate::providers::{fetch_json, Provider};
use crate::Result;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;

lazy_static! {
    static ref WEATHER: Regex = Regex::new(r"(?i)weather|temperature|climate").unwrap();
}

const FORECAST_URL: &str =
    "https://api.open-meteo.com/v1/forecast?latitude=6.5244&longitude=3.3792&current_weather=true";

pub struct OpenMeteo {
    client: Client,
    timeout: Duration,
}

impl OpenMeteo {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait::async_trait]
impl Provider<Snippet> for OpenMeteo {
    fn name(&self) -> &'static str {
        "open-meteo"
    }

    async fn fetch(&self, query: &str, _chain_hint: Option<&str>) -> Result<Option<Snippet>> {
        if !WEATHER.is_match(query) {
            return Ok(None);
        }

        let Some(body) =
            fetch_json(self.name(), self.client.get(FORECAST_URL).timeout(self.timeout)).await
        else {
            return Ok(None);
        };

        let current = &body["current_weather"];
        let (Some(temperature), Some(windspeed)) =
            (current["temperature"].as_f64(), current["windspeed"].as_f64())
        else {
            return Ok(None);
        };

        Ok(Some(Snippet {
            source: "open-meteo",
            title: "Current Weather Data".to_string(),
            summary: format!(
                "Temperature: {}°C, Windspeed: {}km/h.",
                temperature, windspeed
            ),
            url: Some("https://open-meteo.com/".to_string()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_non_weather_query_is_skipped() {
        let adapter = OpenMeteo::new(Client::new(), Duration::from_secs(1));
        // no request is issued, so this stays fast and offline
        let result = adapter.fetch("who founded the red cross", None).await.unwrap();
        assert!(result.is_none());
    }
}
