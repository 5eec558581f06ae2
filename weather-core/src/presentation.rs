//! Weather category → icon and background theme.

use serde::{Serialize, Serializer};

/// Weather group reported by the service (`weather[0].main`), lower-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCategory {
    Clear,
    Sun,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Fog,
    Haze,
    Unknown,
}

impl WeatherCategory {
    /// Case-sensitive: callers lower-case first.
    pub fn from_key(key: &str) -> Self {
        match key {
            "clear" => WeatherCategory::Clear,
            "sun" => WeatherCategory::Sun,
            "clouds" => WeatherCategory::Clouds,
            "rain" => WeatherCategory::Rain,
            "drizzle" => WeatherCategory::Drizzle,
            "thunderstorm" => WeatherCategory::Thunderstorm,
            "snow" => WeatherCategory::Snow,
            "mist" => WeatherCategory::Mist,
            "fog" => WeatherCategory::Fog,
            "haze" => WeatherCategory::Haze,
            _ => WeatherCategory::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconId {
    DaySunny,
    Cloudy,
    Rain,
    Sprinkle,
    Thunderstorm,
    Snow,
    Fog,
    DayHaze,
    /// Fallback for anything unmapped.
    Cloud,
}

impl IconId {
    /// Icon-font class, e.g. `wi wi-day-sunny`.
    pub fn class_name(&self) -> &'static str {
        match self {
            IconId::DaySunny => "wi wi-day-sunny",
            IconId::Cloudy => "wi wi-cloudy",
            IconId::Rain => "wi wi-rain",
            IconId::Sprinkle => "wi wi-sprinkle",
            IconId::Thunderstorm => "wi wi-thunderstorm",
            IconId::Snow => "wi wi-snow",
            IconId::Fog => "wi wi-fog",
            IconId::DayHaze => "wi wi-day-haze",
            IconId::Cloud => "wi wi-cloud",
        }
    }

    /// Terminal stand-in for the icon.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconId::DaySunny => "☀",
            IconId::Cloudy => "☁",
            IconId::Rain => "🌧",
            IconId::Sprinkle => "🌦",
            IconId::Thunderstorm => "⛈",
            IconId::Snow => "❄",
            IconId::Fog => "🌫",
            IconId::DayHaze => "🌤",
            IconId::Cloud => "☁",
        }
    }
}

impl Serialize for IconId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.class_name())
    }
}

/// Background gradient associated with a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Clear,
    Sun,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
}

impl Theme {
    /// Start and end colours of the 135° gradient.
    pub fn colors(&self) -> (&'static str, &'static str) {
        match self {
            Theme::Clear => ("#56CCF2", "#2F80ED"),
            Theme::Sun => ("#F2994A", "#F2C94C"),
            Theme::Clouds => ("#667eea", "#764ba2"),
            Theme::Rain => ("#4A5568", "#2D3748"),
            Theme::Drizzle => ("#647DEE", "#7F53AC"),
            Theme::Thunderstorm => ("#1e3c72", "#2a5298"),
            Theme::Snow => ("#E0EAFC", "#CFDEF3"),
            Theme::Mist => ("#606c88", "#3f4c6b"),
        }
    }

    /// Primary colour as an RGB triple.
    pub fn primary_rgb(&self) -> (u8, u8, u8) {
        let (hex, _) = self.colors();
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(1), channel(3), channel(5))
    }
}

pub fn icon_for(category: WeatherCategory) -> IconId {
    match category {
        WeatherCategory::Clear => IconId::DaySunny,
        WeatherCategory::Clouds => IconId::Cloudy,
        WeatherCategory::Rain => IconId::Rain,
        WeatherCategory::Drizzle => IconId::Sprinkle,
        WeatherCategory::Thunderstorm => IconId::Thunderstorm,
        WeatherCategory::Snow => IconId::Snow,
        WeatherCategory::Mist | WeatherCategory::Fog => IconId::Fog,
        WeatherCategory::Haze => IconId::DayHaze,
        WeatherCategory::Sun | WeatherCategory::Unknown => IconId::Cloud,
    }
}

pub fn theme_for(category: WeatherCategory) -> Theme {
    match category {
        WeatherCategory::Sun => Theme::Sun,
        WeatherCategory::Clouds => Theme::Clouds,
        WeatherCategory::Rain => Theme::Rain,
        WeatherCategory::Drizzle => Theme::Drizzle,
        WeatherCategory::Thunderstorm => Theme::Thunderstorm,
        WeatherCategory::Snow => Theme::Snow,
        WeatherCategory::Mist => Theme::Mist,
        WeatherCategory::Clear
        | WeatherCategory::Fog
        | WeatherCategory::Haze
        | WeatherCategory::Unknown => Theme::Clear,
    }
}
