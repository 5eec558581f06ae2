use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{
    error::QueryError,
    presentation::{IconId, Theme},
};

/// A location name that survived trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ----- OpenWeather `/forecast` payload -----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastResponse {
    pub city: RawCity,
    pub list: Vec<RawForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCity {
    pub name: String,
    pub country: String,
    /// Shift in seconds from UTC.
    #[serde(default)]
    pub timezone: i32,
}

/// One 3-hour data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastEntry {
    /// Unix seconds.
    pub dt: i64,
    pub main: RawMain,
    pub weather: Vec<RawWeather>,
    pub wind: RawWind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWeather {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWind {
    /// Metres per second.
    pub speed: f64,
}

// ----- Normalized view model -----

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedCurrentConditions {
    pub city: String,
    pub country: String,
    pub temperature_c: i64,
    pub feels_like_c: i64,
    pub humidity_pct: i64,
    /// Already rounded to one decimal.
    pub wind_speed_kmh: f64,
    pub pressure_hpa: i64,
    pub description: String,
    pub icon: IconId,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDayEntry {
    pub weekday: String,
    pub temperature_c: i64,
    pub icon: IconId,
}

/// Everything a successful search renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub current: NormalizedCurrentConditions,
    pub forecast: Vec<ForecastDayEntry>,
    /// Local wall-clock time at which the result arrived.
    pub retrieved_at: DateTime<FixedOffset>,
}

/// What the display shows. Each new state replaces the previous one outright.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState {
    Loading,
    Success(WeatherView),
    Error(String),
}
