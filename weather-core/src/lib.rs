//! Core library for the `weather` widget.
//!
//! This crate defines:
//! - The OpenWeather forecast provider
//! - Normalization of raw forecasts into a display-ready view model
//! - Category → icon/theme mapping
//! - Rendering of loading, success and error states
//! - The search controller that ties one submission to one render cycle
//!
//! It is used by `weather-cli`, but any host that implements [`DisplaySink`] can drive it.

pub mod config;
pub mod controller;
pub mod error;
pub mod locale;
pub mod model;
pub mod presentation;
pub mod provider;
pub mod render;
pub mod transform;

pub use config::Config;
pub use controller::{DisplaySink, SearchController, SubmitOutcome};
pub use error::{QueryError, WeatherError};
pub use model::{
    DisplayState, ForecastDayEntry, NormalizedCurrentConditions, RawForecastResponse,
    SearchQuery, WeatherView,
};
pub use presentation::{IconId, Theme, WeatherCategory};
pub use provider::{OpenWeatherProvider, WeatherProvider, provider_from_config};
pub use render::{DisplayOutput, render};
