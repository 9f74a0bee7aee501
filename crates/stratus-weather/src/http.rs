//! Shared HTTP plumbing for the Open-Meteo clients.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::WeatherError;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Build the request client used by both API clients.
pub(crate) fn build_client() -> Result<reqwest::Client, WeatherError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;
    Ok(client)
}

/// Decode a successful response body, mapping non-success statuses to
/// `WeatherError::Api`.
pub(crate) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, WeatherError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json().await?)
    } else {
        Err(WeatherError::Api(status.as_u16()))
    }
}
