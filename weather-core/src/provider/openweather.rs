use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::{RawForecastResponse, SearchQuery, WeatherError, config::DEFAULT_BASE_URL};

use super::WeatherProvider;

pub const UNITS: &str = "metric";
pub const LANGUAGE: &str = "pt_pt";

/// Client for the OpenWeather 5 day / 3 hour forecast endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip_all, fields(location = %query))]
    async fn fetch_forecast(&self, query: &SearchQuery) -> Result<RawForecastResponse, WeatherError> {
        let url = self.forecast_url();
        debug!(url = %url, "Fetching forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("units", UNITS),
                ("lang", LANGUAGE),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                // the URL carries the API key
                let e = e.without_url();
                warn!(error = %e, "Forecast request failed");
                WeatherError::Transport(e.to_string())
            })?;

        let status = res.status();
        if !status.is_success() {
            warn!(%status, "Forecast service rejected location");
            return Err(WeatherError::NotFound);
        }

        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::Transport(e.without_url().to_string()))?;

        let parsed: RawForecastResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, body = %truncate_body(&body), "Unexpected forecast payload");
            WeatherError::from(e)
        })?;

        debug!(entries = parsed.list.len(), city = %parsed.city.name, "Forecast received");
        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
