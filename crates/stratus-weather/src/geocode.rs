//! Place-name search against the Open-Meteo geocoding API.
//! Free, no API key required.

use serde::Deserialize;

use crate::error::WeatherError;
use crate::http;
use crate::types::Location;

const GEOCODING_API_BASE: &str = "https://geocoding-api.open-meteo.com/v1";

/// Minimum trimmed query length before a UI should ask for suggestions.
///
/// Shorter queries are still served when submitted directly; this is the
/// agreed threshold for as-you-type lookups only.
pub const SUGGEST_MIN_CHARS: usize = 3;

/// Whether a query is long enough for as-you-type suggestions.
pub fn meets_suggest_threshold(query: &str) -> bool {
    query.trim().chars().count() >= SUGGEST_MIN_CHARS
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    // Absent entirely when nothing matched
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

impl From<GeocodeResult> for Location {
    fn from(result: GeocodeResult) -> Self {
        Self {
            name: result.name,
            country: result.country.unwrap_or_default(),
            admin1: result.admin1,
            latitude: result.latitude,
            longitude: result.longitude,
        }
    }
}

/// Client for free-text location search.
pub struct GeocodeClient {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

impl GeocodeClient {
    /// Client against the public Open-Meteo geocoding endpoint.
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_base_url(GEOCODING_API_BASE)
    }

    /// Client against a custom endpoint (self-hosted instance, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, WeatherError> {
        Ok(Self {
            client: http::build_client()?,
            base_url: base_url.into(),
            language: "en".to_string(),
        })
    }

    /// Override the result language (two-letter code, default "en").
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Up to five candidate locations for a free-text query.
    ///
    /// An empty or whitespace-only query yields an empty list without
    /// touching the network. Candidates keep the provider's ordering.
    pub async fn suggest(&self, query: &str) -> Result<Vec<Location>, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.search(query, 5).await
    }

    /// Best-match location for a query.
    ///
    /// Fails with `LocationNotFound` when the provider has no candidates.
    pub async fn resolve_best(&self, query: &str) -> Result<Location, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherError::LocationNotFound(query.to_string()));
        }

        let mut candidates = self.search(query, 1).await?;
        if candidates.is_empty() {
            return Err(WeatherError::LocationNotFound(query.to_string()));
        }
        let location = candidates.remove(0);
        tracing::info!(
            "Resolved \"{}\" to {} ({}, {})",
            query,
            location.display_name(),
            location.latitude,
            location.longitude
        );
        Ok(location)
    }

    async fn search(&self, query: &str, count: u8) -> Result<Vec<Location>, WeatherError> {
        let url = format!("{}/search", self.base_url);
        let params = [
            ("name", query.to_string()),
            ("count", count.to_string()),
            ("language", self.language.clone()),
            ("format", "json".to_string()),
        ];

        let response = self.client.get(&url).query(&params).send().await?;
        let body: GeocodingResponse = http::handle_response(response).await?;

        let candidates = body.results.unwrap_or_default();
        tracing::debug!("Geocoding \"{}\" returned {} candidates", query, candidates.len());
        Ok(candidates.into_iter().map(Location::from).collect())
    }
}
