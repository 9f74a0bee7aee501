//! Weather engine for Stratus
//!
//! Location search and forecast retrieval against the Open-Meteo public
//! APIs, plus the shaping of raw payloads into display-ready views.
//! Everything here is stateless; session state lives in `stratus-core`.

pub mod conditions;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod transform;
pub mod types;
pub mod units;

mod http;

pub use conditions::{describe, ConditionInfo};
pub use error::WeatherError;
pub use forecast::{ForecastClient, ForecastPayload};
pub use geocode::{meets_suggest_threshold, GeocodeClient, SUGGEST_MIN_CHARS};
pub use transform::transform;
pub use types::{CurrentSnapshot, DailyEntry, HourlyEntry, Location, WeatherView};
pub use units::{PrecipitationUnit, ResolvedUnits, TemperatureUnit, UnitConfig};
