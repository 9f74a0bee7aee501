//! Shapes raw forecast payloads into the display-ready `WeatherView`.

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::error::WeatherError;
use crate::forecast::{DailyBlock, ForecastPayload, HourlyBlock};
use crate::types::{CurrentSnapshot, DailyEntry, HourlyEntry, Location, WeatherView};
use crate::units::UnitConfig;

/// Build a `WeatherView` from a raw payload.
///
/// Fails with `MalformedPayload` when the current conditions block is
/// missing. Empty hourly/daily series produce empty sequences, and rows
/// with unparseable dates or null samples are skipped rather than failing
/// the whole view.
pub fn transform(
    payload: &ForecastPayload,
    location: Location,
    units: UnitConfig,
) -> Result<WeatherView, WeatherError> {
    let current_block = payload.current.as_ref().ok_or(WeatherError::MalformedPayload)?;

    let current = CurrentSnapshot {
        temperature: round_i32(current_block.temperature_2m),
        feels_like: round_i32(current_block.apparent_temperature),
        weather_code: current_block.weather_code,
        humidity: current_block.relative_humidity_2m,
        wind_speed: round_i32(current_block.wind_speed_10m),
        precipitation: round_tenth(current_block.precipitation.unwrap_or(0.0)),
    };

    let daily = build_daily(&payload.daily);
    let hourly = build_hourly(&payload.hourly);

    tracing::debug!(
        "Transformed forecast for {}: {} daily, {} hourly entries",
        location.name,
        daily.len(),
        hourly.len()
    );

    Ok(WeatherView {
        location,
        as_of: format_as_of(Local::now().date_naive()),
        current,
        daily,
        hourly,
        units,
    })
}

/// Full date stamp for the view header, e.g. "Monday, January 15, 2024".
fn format_as_of(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

fn build_daily(daily: &DailyBlock) -> Vec<DailyEntry> {
    let mut entries = Vec::with_capacity(daily.time.len());
    for (idx, raw_date) in daily.time.iter().enumerate() {
        let Ok(date) = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d") else {
            tracing::warn!("Skipping daily entry with bad date: {}", raw_date);
            continue;
        };
        let Some(high) = daily.temperature_2m_max.get(idx).copied().flatten() else {
            continue;
        };
        let Some(low) = daily.temperature_2m_min.get(idx).copied().flatten() else {
            continue;
        };
        let Some(weather_code) = daily.weather_code.get(idx).copied().flatten() else {
            continue;
        };

        // First surviving entry is today's forecast whatever its weekday
        let label = if entries.is_empty() {
            "Today".to_string()
        } else {
            date.format("%a").to_string()
        };

        entries.push(DailyEntry {
            date,
            label,
            high: round_i32(high),
            low: round_i32(low),
            weather_code,
        });
    }
    entries
}

fn build_hourly(hourly: &HourlyBlock) -> Vec<HourlyEntry> {
    let mut entries = Vec::with_capacity(hourly.time.len());
    for (idx, raw_time) in hourly.time.iter().enumerate() {
        let Some(timestamp) = parse_timestamp(raw_time) else {
            tracing::warn!("Skipping hourly sample with bad timestamp: {}", raw_time);
            continue;
        };
        let Some(temperature) = hourly.temperature_2m.get(idx).copied().flatten() else {
            continue;
        };
        let Some(weather_code) = hourly.weather_code.get(idx).copied().flatten() else {
            continue;
        };

        entries.push(HourlyEntry {
            timestamp,
            display_time: timestamp.format("%-I %p").to_string(),
            temperature: round_i32(temperature),
            weather_code,
        });
    }
    entries
}

// Open-Meteo sends ISO 8601 at minute precision; tolerate seconds too
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// Round to the nearest integer, ties away from zero.
fn round_i32(value: f64) -> i32 {
    value.round() as i32
}

/// Round to one decimal place.
fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
