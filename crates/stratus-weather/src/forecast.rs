//! Forecast retrieval from the Open-Meteo forecast API.
//!
//! The payload mirrors the wire format: per-field parallel arrays indexed
//! by timestamp (hourly) or date (daily). Shaping it for display is the
//! transformer's job.

use serde::Deserialize;

use crate::error::WeatherError;
use crate::http;
use crate::types::Location;
use crate::units::UnitConfig;

const FORECAST_API_BASE: &str = "https://api.open-meteo.com/v1";
const FORECAST_DAYS: u8 = 7;

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m,precipitation";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

/// Raw forecast response.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    /// Current conditions; `None` when the provider omitted the block
    pub current: Option<CurrentBlock>,
    #[serde(default)]
    pub hourly: HourlyBlock,
    #[serde(default)]
    pub daily: DailyBlock,
}

/// Current conditions block, in the requested units.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentBlock {
    pub temperature_2m: f64,
    pub relative_humidity_2m: u8,
    pub apparent_temperature: f64,
    pub weather_code: i32,
    pub wind_speed_10m: f64,
    /// Absent or null when the provider has no precipitation reading
    pub precipitation: Option<f64>,
}

/// Hourly parallel arrays. Individual samples may be null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlyBlock {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub weather_code: Vec<Option<i32>>,
}

/// Daily parallel arrays. Individual samples may be null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyBlock {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub weather_code: Vec<Option<i32>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
}

/// Client for the forecast endpoint.
pub struct ForecastClient {
    client: reqwest::Client,
    base_url: String,
}

impl ForecastClient {
    /// Client against the public Open-Meteo forecast endpoint.
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_base_url(FORECAST_API_BASE)
    }

    /// Client against a custom endpoint (self-hosted instance, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, WeatherError> {
        Ok(Self {
            client: http::build_client()?,
            base_url: base_url.into(),
        })
    }

    /// Fetch a 7-day forecast for a location, in the requested units.
    pub async fn fetch(
        &self,
        location: &Location,
        units: UnitConfig,
    ) -> Result<ForecastPayload, WeatherError> {
        let resolved = units.resolve();
        let url = format!("{}/forecast", self.base_url);
        let params = [
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("temperature_unit", resolved.api_temperature.to_string()),
            ("wind_speed_unit", resolved.api_wind_speed.to_string()),
            ("precipitation_unit", resolved.api_precipitation.to_string()),
            ("timezone", "auto".to_string()),
            ("forecast_days", FORECAST_DAYS.to_string()),
        ];

        tracing::debug!(
            "Fetching forecast for {} ({}, {})",
            location.name,
            location.latitude,
            location.longitude
        );

        let response = self.client.get(&url).query(&params).send().await?;
        http::handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn berlin() -> Location {
        Location {
            name: "Berlin".to_string(),
            country: "Germany".to_string(),
            admin1: None,
            latitude: 52.52,
            longitude: 13.41,
        }
    }

    fn sample_body() -> serde_json::Value {
        serde_json::json!({
            "latitude": 52.52,
            "longitude": 13.41,
            "current": {
                "time": "2024-01-15T12:00",
                "temperature_2m": 18.4,
                "relative_humidity_2m": 65,
                "apparent_temperature": 17.2,
                "weather_code": 3,
                "wind_speed_10m": 12.3,
                "precipitation": 0.0
            },
            "hourly": {
                "time": ["2024-01-15T00:00", "2024-01-15T01:00"],
                "temperature_2m": [10.2, 9.8],
                "weather_code": [2, 3]
            },
            "daily": {
                "time": ["2024-01-15", "2024-01-16"],
                "weather_code": [3, 61],
                "temperature_2m_max": [19.6, 14.1],
                "temperature_2m_min": [8.4, 6.9]
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_parses_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("latitude", "52.52"))
            .and(query_param("longitude", "13.41"))
            .and(query_param("forecast_days", "7"))
            .and(query_param("timezone", "auto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .mount(&mock_server)
            .await;

        let client = ForecastClient::with_base_url(mock_server.uri()).unwrap();
        let payload = client.fetch(&berlin(), UnitConfig::default()).await.unwrap();

        let current = payload.current.unwrap();
        assert!((current.temperature_2m - 18.4).abs() < f64::EPSILON);
        assert_eq!(current.weather_code, 3);
        assert_eq!(payload.hourly.time.len(), 2);
        assert_eq!(payload.daily.time.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_sends_metric_unit_tokens() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("temperature_unit", "celsius"))
            .and(query_param("wind_speed_unit", "kmh"))
            .and(query_param("precipitation_unit", "mm"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ForecastClient::with_base_url(mock_server.uri()).unwrap();
        client.fetch(&berlin(), UnitConfig::default()).await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_sends_imperial_unit_tokens() {
        use crate::units::{PrecipitationUnit, TemperatureUnit};

        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("temperature_unit", "fahrenheit"))
            .and(query_param("wind_speed_unit", "mph"))
            .and(query_param("precipitation_unit", "inch"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let units = UnitConfig {
            temperature: TemperatureUnit::Imperial,
            precipitation: PrecipitationUnit::Inches,
        };
        let client = ForecastClient::with_base_url(mock_server.uri()).unwrap();
        client.fetch(&berlin(), units).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_blocks_default_to_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"latitude": 52.52, "longitude": 13.41})),
            )
            .mount(&mock_server)
            .await;

        let client = ForecastClient::with_base_url(mock_server.uri()).unwrap();
        let payload = client.fetch(&berlin(), UnitConfig::default()).await.unwrap();

        assert!(payload.current.is_none());
        assert!(payload.hourly.time.is_empty());
        assert!(payload.daily.time.is_empty());
    }

    #[tokio::test]
    async fn test_service_unavailable_maps_to_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = ForecastClient::with_base_url(mock_server.uri()).unwrap();
        let result = client.fetch(&berlin(), UnitConfig::default()).await;

        assert!(matches!(result, Err(WeatherError::Api(503))));
    }
}
