use thiserror::Error;

/// Message shown when the forecast service rejects a location.
pub const NOT_FOUND_MESSAGE: &str = "Cidade não encontrada";

/// Rejected user input. Never reaches the display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("location must not be empty")]
    Empty,
}

/// Failures of a single search cycle, all of which end in the Error display state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// The service answered with a non-success status.
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    /// No response was obtained.
    #[error("{0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("{0}")]
    Parse(String),

    #[error(
        "No API key configured.\n\
         Hint: run `weather configure` or set OPENWEATHER_API_KEY."
    )]
    MissingApiKey,
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_uses_fixed_message() {
        assert_eq!(WeatherError::NotFound.to_string(), "Cidade não encontrada");
    }

    #[test]
    fn transport_and_parse_keep_underlying_text() {
        assert_eq!(WeatherError::Transport("connection refused".into()).to_string(), "connection refused");

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = WeatherError::from(json_err);
        assert!(matches!(err, WeatherError::Parse(_)));
    }
}
