//! View-facing weather data types.
//!
//! Everything here is a plain value: built fresh by the transformer on each
//! successful fetch and replaced as a whole, never mutated field-by-field.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::conditions::{self, ConditionInfo};
use crate::units::UnitConfig;

/// Geocoded place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    /// First-level administrative area (state, province), when reported
    pub admin1: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Render "Name, Admin1, Country", skipping parts that are absent,
    /// empty, or repeat the place name.
    pub fn display_name(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        if let Some(admin1) = self
            .admin1
            .as_deref()
            .filter(|a| !a.is_empty() && *a != self.name)
        {
            parts.push(admin1);
        }
        if !self.country.is_empty() && self.country != self.name {
            parts.push(self.country.as_str());
        }
        parts.join(", ")
    }
}

/// Current conditions, already rounded for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentSnapshot {
    pub temperature: i32,
    pub feels_like: i32,
    pub weather_code: i32,
    pub humidity: u8,
    pub wind_speed: i32,
    /// Amount in the requested precipitation unit, one decimal place
    pub precipitation: f64,
}

impl CurrentSnapshot {
    /// Catalog entry for this snapshot's weather code.
    pub fn condition(&self) -> ConditionInfo {
        conditions::describe(self.weather_code)
    }
}

/// One day of the forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub date: NaiveDate,
    /// "Today" for the first entry, weekday name afterwards
    pub label: String,
    pub high: i32,
    pub low: i32,
    pub weather_code: i32,
}

impl DailyEntry {
    /// Catalog entry for this day's weather code.
    pub fn condition(&self) -> ConditionInfo {
        conditions::describe(self.weather_code)
    }
}

/// One hourly sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    pub timestamp: NaiveDateTime,
    /// Time-of-day label, e.g. "3 PM"
    pub display_time: String,
    pub temperature: i32,
    pub weather_code: i32,
}

impl HourlyEntry {
    /// Catalog entry for this hour's weather code.
    pub fn condition(&self) -> ConditionInfo {
        conditions::describe(self.weather_code)
    }
}

/// Canonical display projection of one fetch cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherView {
    pub location: Location,
    /// Wall-clock date when the view was built, e.g. "Tuesday, January 15, 2024"
    pub as_of: String,
    pub current: CurrentSnapshot,
    pub daily: Vec<DailyEntry>,
    pub hourly: Vec<HourlyEntry>,
    /// Units the forecast was requested in
    pub units: UnitConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn berlin() -> Location {
        Location {
            name: "Berlin".to_string(),
            country: "Germany".to_string(),
            admin1: None,
            latitude: 52.52,
            longitude: 13.41,
        }
    }

    #[test]
    fn test_display_name_with_country() {
        assert_eq!(berlin().display_name(), "Berlin, Germany");
    }

    #[test]
    fn test_display_name_with_admin_region() {
        let loc = Location {
            name: "Portland".to_string(),
            country: "United States".to_string(),
            admin1: Some("Oregon".to_string()),
            latitude: 45.52,
            longitude: -122.68,
        };
        assert_eq!(loc.display_name(), "Portland, Oregon, United States");
    }

    #[test]
    fn test_display_name_skips_empty_and_duplicate_parts() {
        let loc = Location {
            name: "Singapore".to_string(),
            country: "Singapore".to_string(),
            admin1: Some(String::new()),
            latitude: 1.35,
            longitude: 103.82,
        };
        assert_eq!(loc.display_name(), "Singapore");
    }

    #[test]
    fn test_current_snapshot_condition() {
        let current = CurrentSnapshot {
            temperature: 18,
            feels_like: 17,
            weather_code: 3,
            humidity: 65,
            wind_speed: 12,
            precipitation: 0.0,
        };
        assert_eq!(current.condition().label, "Overcast");
        assert_eq!(current.condition().icon, "☁️");
    }
}
