//! Display state → text for the display sink.
//!
//! Rendering is a pure function of the state: every call produces the full
//! output, and the background theme travels alongside the text instead of
//! being applied here.

use std::fmt::Write;

use crate::{
    locale,
    model::{DisplayState, WeatherView},
    presentation::Theme,
};

pub const LOADING_MESSAGE: &str = "Carregando dados...";
pub const ERROR_PREFIX: &str = "Ops!";
pub const ERROR_HINT: &str = "Tente buscar outra cidade";
pub const ERROR_ICON: &str = "⚠";
pub const FORECAST_TITLE: &str = "Previsão para os próximos dias";

/// Complete output of one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOutput {
    pub text: String,
    /// Background to apply; only set for successful results.
    pub theme: Option<Theme>,
}

pub fn render(state: &DisplayState) -> DisplayOutput {
    match state {
        DisplayState::Loading => DisplayOutput {
            text: format!("⏳ {LOADING_MESSAGE}\n"),
            theme: None,
        },
        DisplayState::Success(view) => DisplayOutput {
            text: render_success(view),
            theme: Some(view.current.theme),
        },
        DisplayState::Error(message) => DisplayOutput {
            text: format!("{ERROR_ICON}\n{ERROR_PREFIX} {message}\n{ERROR_HINT}\n"),
            theme: None,
        },
    }
}

fn render_success(view: &WeatherView) -> String {
    let current = &view.current;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}, {}", current.city, current.country);
    let _ = writeln!(
        out,
        "{} (meu horário local)",
        locale::format_date_time(&view.retrieved_at)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}°C  {}", current.temperature_c, current.icon.glyph());
    let _ = writeln!(out, "{}", current.description);
    let _ = writeln!(out, "Sensação térmica: {}°C", current.feels_like_c);
    let _ = writeln!(out);
    let _ = writeln!(out, "💧 Umidade: {}%", current.humidity_pct);
    let _ = writeln!(out, "🌬 Vento: {:.1} km/h", current.wind_speed_kmh);
    let _ = writeln!(out, "⏲ Pressão: {} hPa", current.pressure_hpa);
    let _ = writeln!(out);
    let _ = writeln!(out, "{FORECAST_TITLE}");

    let strip = view
        .forecast
        .iter()
        .map(|day| format!("{} {} {}°", day.weekday, day.icon.glyph(), day.temperature_c))
        .collect::<Vec<_>>()
        .join("  │  ");
    let _ = writeln!(out, "{strip}");

    out
}
