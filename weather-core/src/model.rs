use std::fmt;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// A point on the globe, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Result<Self, ProviderError> {
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lon_ok = lon.is_finite() && (-180.0..=180.0).contains(&lon);
        if !lat_ok || !lon_ok {
            return Err(ProviderError::InvalidCoordinates);
        }
        Ok(Self { lat, lon })
    }
}

/// One 3-hour forecast slot as delivered by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSample {
    /// Unix timestamp, seconds.
    pub timestamp: i64,
    pub temperature: f64,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub condition: String,
    pub description: String,
    pub icon: String,
}

/// Forecast samples plus the UTC offset of the forecast location.
///
/// The offset decides which calendar day a sample belongs to.
#[derive(Debug, Clone)]
pub struct SampleSeries {
    pub utc_offset: FixedOffset,
    pub samples: Vec<WeatherSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySummary {
    pub time: String,
    pub temperature: i32,
    pub condition: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Calendar date in the location's time zone, `YYYY-MM-DD`.
    pub date: String,
    /// Short weekday name, e.g. `Mon`.
    pub day: String,
    pub high: i32,
    pub low: i32,
    pub condition: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub hourly: Vec<HourlySummary>,
    pub daily: Vec<DailySummary>,
}

/// Current conditions, already reshaped into display units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    /// °C, rounded.
    pub temperature: i32,
    pub feels_like: i32,
    /// Percent.
    pub humidity: u8,
    /// hPa.
    pub pressure: f64,
    /// km/h, rounded.
    pub wind_speed: i32,
    /// Degrees.
    pub wind_direction: u16,
    /// Kilometres.
    pub visibility: f64,
    /// The free OpenWeather tier carries no UV data, so this is always 0.
    pub uv_index: f64,
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A geocoding hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
}

impl Location {
    pub fn new(name: String, country: String, state: Option<String>, lat: f64, lon: f64) -> Self {
        let display_name = match &state {
            Some(state) => format!("{name}, {state}, {country}"),
            None => format!("{name}, {country}"),
        };

        Self {
            name,
            country,
            state,
            lat,
            lon,
            display_name,
        }
    }

    pub fn coordinates(&self) -> Result<Coordinates, ProviderError> {
        Coordinates::new(self.lat, self.lon)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_reject_out_of_range() {
        assert!(Coordinates::new(51.5, -0.12).is_ok());
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(matches!(Coordinates::new(91.0, 0.0), Err(ProviderError::InvalidCoordinates)));
        assert!(matches!(Coordinates::new(0.0, -180.5), Err(ProviderError::InvalidCoordinates)));
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn display_name_includes_state_when_present() {
        let springfield =
            Location::new("Springfield".into(), "US".into(), Some("Illinois".into()), 39.8, -89.6);
        assert_eq!(springfield.display_name, "Springfield, Illinois, US");

        let paris = Location::new("Paris".into(), "FR".into(), None, 48.85, 2.35);
        assert_eq!(paris.display_name, "Paris, FR");
    }

    #[test]
    fn current_weather_serializes_camel_case() {
        let current = CurrentWeather {
            temperature: 12,
            feels_like: 10,
            humidity: 80,
            pressure: 1012.0,
            wind_speed: 15,
            wind_direction: 240,
            visibility: 10.0,
            uv_index: 0.0,
            condition: "Clouds".into(),
            description: "broken clouds".into(),
            icon: "04d".into(),
            location: "London".into(),
            latitude: 51.51,
            longitude: -0.13,
        };

        let json = serde_json::to_value(&current).expect("serialize");
        assert_eq!(json["feelsLike"], 10);
        assert_eq!(json["windSpeed"], 15);
        assert_eq!(json["uvIndex"], 0.0);
    }
}
