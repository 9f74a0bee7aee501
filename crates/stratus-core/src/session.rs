//! Session state and the transitions that drive it.
//!
//! One `WeatherSession` owns the whole UI-facing state: the installed
//! view, unit preferences, selected day, loading flag and last error.
//! Rendering layers read cloned snapshots and never mutate state
//! directly.

use parking_lot::Mutex;
use thiserror::Error;

use stratus_weather::{
    transform, ForecastClient, GeocodeClient, HourlyEntry, UnitConfig, WeatherError, WeatherView,
};

use crate::config::Config;

/// Error category surfaced to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("Location not found")]
    LocationNotFound,
    #[error("Network error")]
    Network,
    #[error("Malformed forecast payload")]
    MalformedPayload,
}

impl ErrorKind {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::LocationNotFound => "No matching location found. Try a different search.",
            Self::Network => "Network error. Check your connection.",
            Self::MalformedPayload => "Weather service returned incomplete data.",
        }
    }
}

impl From<&WeatherError> for ErrorKind {
    fn from(err: &WeatherError) -> Self {
        match err {
            WeatherError::LocationNotFound(_) => Self::LocationNotFound,
            WeatherError::Network(_) | WeatherError::Api(_) => Self::Network,
            WeatherError::MalformedPayload => Self::MalformedPayload,
        }
    }
}

/// Everything the rendering layer needs, cloned per read.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Last successfully fetched view; survives failed searches
    pub view: Option<WeatherView>,
    pub units: UnitConfig,
    /// Index into `view.daily`; 0 whenever a new view is installed
    pub selected_day: usize,
    /// True while a search is in flight; concurrent searches are dropped
    pub loading: bool,
    pub last_error: Option<ErrorKind>,
}

/// Owns the session state and runs the search/units/day transitions.
pub struct WeatherSession {
    geocoder: GeocodeClient,
    forecast: ForecastClient,
    state: Mutex<SessionState>,
}

impl WeatherSession {
    pub fn new(geocoder: GeocodeClient, forecast: ForecastClient, units: UnitConfig) -> Self {
        Self {
            geocoder,
            forecast,
            state: Mutex::new(SessionState {
                units,
                ..SessionState::default()
            }),
        }
    }

    /// Build a session from the app config, honoring endpoint overrides.
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let geocoder = match &config.geocoding_url {
            Some(url) => GeocodeClient::with_base_url(url.clone()),
            None => GeocodeClient::new(),
        }?
        .language(config.language.clone());

        let forecast = match &config.forecast_url {
            Some(url) => ForecastClient::with_base_url(url.clone()),
            None => ForecastClient::new(),
        }?;

        Ok(Self::new(geocoder, forecast, config.units))
    }

    /// Resolve a query and install a fresh view.
    ///
    /// No-op when the query trims to empty or another search is already
    /// in flight (the second search is dropped, not queued). On failure
    /// the previous view stays installed and only `last_error` changes.
    pub async fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        {
            let mut state = self.state.lock();
            if state.loading {
                tracing::debug!("Search for \"{}\" dropped: another search is in flight", query);
                return;
            }
            state.loading = true;
            state.last_error = None;
        }

        // Lock released across the network calls; `loading` keeps this
        // section single-entry
        let result = self.run_search(query).await;

        let mut state = self.state.lock();
        state.loading = false;
        match result {
            Ok(view) => {
                tracing::info!(
                    "Installed weather view for {} ({} daily, {} hourly entries)",
                    view.location.display_name(),
                    view.daily.len(),
                    view.hourly.len()
                );
                state.view = Some(view);
                state.selected_day = 0;
            }
            Err(err) => {
                tracing::warn!("Search for \"{}\" failed: {}", query, err);
                state.last_error = Some(ErrorKind::from(&err));
            }
        }
    }

    // Geocode first, then fetch with whatever units are current once the
    // location is known.
    async fn run_search(&self, query: &str) -> Result<WeatherView, WeatherError> {
        let location = self.geocoder.resolve_best(query).await?;
        let units = self.state.lock().units;
        let payload = self.forecast.fetch(&location, units).await?;
        transform(&payload, location, units)
    }

    /// Store a new unit preference and re-fetch the installed view in it.
    ///
    /// No-op when the preference is unchanged. Without an installed view
    /// only the stored units change; no fetch happens.
    pub async fn change_units(&self, new_units: UnitConfig) {
        let refetch_query = {
            let mut state = self.state.lock();
            if state.units == new_units {
                return;
            }
            state.units = new_units;
            state.view.as_ref().map(|view| view.location.name.clone())
        };

        match refetch_query {
            Some(query) => self.search(&query).await,
            None => tracing::debug!("Units changed with no view loaded; nothing to re-fetch"),
        }
    }

    /// Select a forecast day.
    ///
    /// Ignored when no view is loaded or the index is outside
    /// `view.daily`. Does not consult `loading`.
    pub fn select_day(&self, index: usize) {
        let mut state = self.state.lock();
        let daily_len = match state.view.as_ref() {
            Some(view) => view.daily.len(),
            None => {
                tracing::debug!("Day selection ignored: no view loaded");
                return;
            }
        };
        if index >= daily_len {
            tracing::debug!("Day selection ignored: index {} out of range", index);
            return;
        }
        state.selected_day = index;
    }

    /// Hourly entries falling on the selected day.
    ///
    /// Empty when no view is loaded or no samples match that date.
    pub fn hours_for_selected_day(&self) -> Vec<HourlyEntry> {
        let state = self.state.lock();
        let Some(view) = state.view.as_ref() else {
            return Vec::new();
        };
        let Some(day) = view.daily.get(state.selected_day) else {
            return Vec::new();
        };
        view.hourly
            .iter()
            .filter(|entry| entry.timestamp.date() == day.date)
            .cloned()
            .collect()
    }

    /// Cloned state for the rendering layer.
    pub fn snapshot(&self) -> SessionState {
        self.state.lock().clone()
    }
}
