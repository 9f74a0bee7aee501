//! Catalog of WMO weather interpretation codes.
//!
//! Open-Meteo reports conditions as numeric `weather_code` values; this
//! module maps them to display labels and emoji icons.
//! See: https://open-meteo.com/en/docs#weathervariables

/// Display label and icon for a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionInfo {
    pub label: &'static str,
    pub icon: &'static str,
}

/// Look up the label and icon for a WMO weather code.
///
/// Total over all inputs: codes outside the catalog map to "Unknown"
/// instead of failing.
pub fn describe(code: i32) -> ConditionInfo {
    let (label, icon) = match code {
        0 => ("Clear sky", "☀️"),
        1 => ("Mainly clear", "🌤️"),
        2 => ("Partly cloudy", "⛅"),
        3 => ("Overcast", "☁️"),
        45 => ("Fog", "🌫️"),
        48 => ("Depositing rime fog", "🌫️"),
        51 => ("Light drizzle", "🌦️"),
        53 => ("Moderate drizzle", "🌦️"),
        55 => ("Dense drizzle", "🌧️"),
        61 => ("Slight rain", "🌦️"),
        63 => ("Moderate rain", "🌧️"),
        65 => ("Heavy rain", "🌧️"),
        71 => ("Slight snow fall", "🌨️"),
        73 => ("Moderate snow fall", "🌨️"),
        75 => ("Heavy snow fall", "❄️"),
        77 => ("Snow grains", "❄️"),
        80 => ("Slight rain showers", "🌦️"),
        81 => ("Moderate rain showers", "🌧️"),
        82 => ("Violent rain showers", "⛈️"),
        85 => ("Slight snow showers", "🌨️"),
        86 => ("Heavy snow showers", "❄️"),
        95 => ("Thunderstorm", "⛈️"),
        96 => ("Thunderstorm with slight hail", "⛈️"),
        99 => ("Thunderstorm with heavy hail", "⛈️"),
        _ => ("Unknown", "❓"),
    };
    ConditionInfo { label, icon }
}
