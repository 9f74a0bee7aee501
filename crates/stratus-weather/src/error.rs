//! Weather service error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("No locations found for \"{0}\"")]
    LocationNotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: status {0}")]
    Api(u16),

    #[error("Forecast payload is missing the current conditions block")]
    MalformedPayload,
}

impl WeatherError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::LocationNotFound(query) => {
                format!("No locations found for \"{}\". Try a different search.", query)
            }
            Self::Network(_) => "Network error. Check your connection.".to_string(),
            Self::Api(status) => format!("Weather service error ({}). Try again later.", status),
            Self::MalformedPayload => "Weather service returned incomplete data.".to_string(),
        }
    }
}
