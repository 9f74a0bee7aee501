//! Unit preferences and their API/display mappings.

use serde::{Deserialize, Serialize};

/// Temperature and wind speed unit system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Metric,
    Imperial,
}

/// Precipitation unit, selected independently of the temperature system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationUnit {
    #[default]
    Millimeters,
    Inches,
}

/// Complete unit preference pair. Replaced as a whole, never patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UnitConfig {
    #[serde(default)]
    pub temperature: TemperatureUnit,
    #[serde(default)]
    pub precipitation: PrecipitationUnit,
}

/// Unit tokens for Open-Meteo requests plus the matching display suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedUnits {
    pub api_temperature: &'static str,
    pub api_wind_speed: &'static str,
    pub api_precipitation: &'static str,
    pub temperature_suffix: &'static str,
    pub wind_suffix: &'static str,
    pub precipitation_suffix: &'static str,
}

impl UnitConfig {
    /// Resolve the API tokens and display suffixes for this preference pair.
    ///
    /// Temperature and wind follow the temperature system; precipitation
    /// follows its own axis.
    pub fn resolve(&self) -> ResolvedUnits {
        let (api_temperature, api_wind_speed, temperature_suffix, wind_suffix) =
            match self.temperature {
                TemperatureUnit::Metric => ("celsius", "kmh", "°C", "km/h"),
                TemperatureUnit::Imperial => ("fahrenheit", "mph", "°F", "mph"),
            };
        let (api_precipitation, precipitation_suffix) = match self.precipitation {
            PrecipitationUnit::Millimeters => ("mm", "mm"),
            PrecipitationUnit::Inches => ("inch", "inch"),
        };

        ResolvedUnits {
            api_temperature,
            api_wind_speed,
            api_precipitation,
            temperature_suffix,
            wind_suffix,
            precipitation_suffix,
        }
    }
}
