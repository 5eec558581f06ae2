//! Raw `/forecast` payload → display-ready view model.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};

use crate::{
    error::WeatherError,
    locale,
    model::{
        ForecastDayEntry, NormalizedCurrentConditions, RawForecastEntry, RawForecastResponse,
        RawWeather, WeatherView,
    },
    presentation::{WeatherCategory, icon_for, theme_for},
};

/// Entries per day at 3-hour granularity.
pub const ENTRIES_PER_DAY: usize = 8;
pub const FORECAST_DAYS: usize = 5;

const MPS_TO_KMH: f64 = 3.6;

/// Current conditions from `list[0]`, plus up to five daily samples.
pub fn normalize(
    raw: &RawForecastResponse,
    retrieved_at: DateTime<FixedOffset>,
) -> Result<WeatherView, WeatherError> {
    let first = raw
        .list
        .first()
        .ok_or_else(|| WeatherError::Parse("forecast response contained no entries".into()))?;
    let weather = primary_weather(first)?;
    let category = category_of(weather);

    let current = NormalizedCurrentConditions {
        city: raw.city.name.clone(),
        country: raw.city.country.clone(),
        temperature_c: round_half_up(first.main.temp),
        feels_like_c: round_half_up(first.main.feels_like),
        humidity_pct: round_half_up(first.main.humidity),
        wind_speed_kmh: mps_to_kmh(first.wind.speed),
        pressure_hpa: round_half_up(first.main.pressure),
        description: weather.description.clone(),
        icon: icon_for(category),
        theme: theme_for(category),
    };

    let offset = city_offset(raw.city.timezone);
    let forecast = raw
        .list
        .iter()
        .step_by(ENTRIES_PER_DAY)
        .take(FORECAST_DAYS)
        .map(|entry| forecast_day(entry, offset))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WeatherView { current, forecast, retrieved_at })
}

/// `m/s × 3.6`, rounded to one decimal.
pub fn mps_to_kmh(speed: f64) -> f64 {
    (speed * MPS_TO_KMH * 10.0).round() / 10.0
}

/// Halves go toward positive infinity: `2.5 → 3`, `-2.5 → -2`.
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

fn forecast_day(entry: &RawForecastEntry, offset: FixedOffset) -> Result<ForecastDayEntry, WeatherError> {
    let at = DateTime::from_timestamp(entry.dt, 0)
        .ok_or_else(|| WeatherError::Parse(format!("timestamp out of range: {}", entry.dt)))?
        .with_timezone(&offset);
    let category = category_of(primary_weather(entry)?);

    Ok(ForecastDayEntry {
        weekday: locale::weekday_short(at.weekday()).to_string(),
        temperature_c: round_half_up(entry.main.temp),
        icon: icon_for(category),
    })
}

fn primary_weather(entry: &RawForecastEntry) -> Result<&RawWeather, WeatherError> {
    entry
        .weather
        .first()
        .ok_or_else(|| WeatherError::Parse(format!("entry at {} has no weather data", entry.dt)))
}

fn category_of(weather: &RawWeather) -> WeatherCategory {
    WeatherCategory::from_key(&weather.main.to_lowercase())
}

fn city_offset(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
}
