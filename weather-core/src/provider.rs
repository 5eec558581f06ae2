use crate::{Config, RawForecastResponse, SearchQuery, WeatherError};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of raw multi-day forecasts. One call is one outbound request.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, query: &SearchQuery) -> Result<RawForecastResponse, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let api_key = config.api_key().ok_or(WeatherError::MissingApiKey)?;
    Ok(Box::new(OpenWeatherProvider::with_base_url(api_key, config.base_url.clone())))
}
