use async_trait::async_trait;
use chrono::FixedOffset;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    config::Endpoints,
    error::ProviderError,
    model::{Coordinates, CurrentWeather, Location, SampleSeries, WeatherSample},
    units::round_half_up,
};

use super::{SEARCH_LIMIT, WeatherProvider};

/// Client for the OpenWeather 2.5 and geocoding APIs.
///
/// All readings are requested in metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: Option<String>,
    endpoints: Endpoints,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(
        api_key: Option<String>,
        endpoints: Endpoints,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            endpoints,
            http,
        })
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)
    }

    fn coordinate_query(
        &self,
        coords: Coordinates,
    ) -> Result<Vec<(&'static str, String)>, ProviderError> {
        Ok(vec![
            ("lat", coords.lat.to_string()),
            ("lon", coords.lon.to_string()),
            ("appid", self.api_key()?.to_string()),
            ("units", "metric".to_string()),
        ])
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&'static str, String)],
    ) -> Result<T, ProviderError> {
        debug!(%url, "requesting OpenWeather");

        let res = self.http.get(&url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%url, %status, "OpenWeather returned an error status");
            return Err(ProviderError::upstream(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn current(&self, coords: Coordinates) -> Result<CurrentWeather, ProviderError> {
        let query = self.coordinate_query(coords)?;
        let url = join_url(&self.endpoints.api_base_url, "weather");

        let parsed: OwCurrentResponse = self.get_json(url, &query).await?;
        parsed.into_current()
    }

    #[instrument(skip(self))]
    async fn forecast(&self, coords: Coordinates) -> Result<SampleSeries, ProviderError> {
        let query = self.coordinate_query(coords)?;
        let url = join_url(&self.endpoints.api_base_url, "forecast");

        let parsed: OwForecastResponse = self.get_json(url, &query).await?;
        parsed.into_series()
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Location>, ProviderError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ProviderError::EmptyQuery);
        }

        let params = vec![
            ("q", query.to_string()),
            ("limit", SEARCH_LIMIT.to_string()),
            ("appid", self.api_key()?.to_string()),
        ];
        let url = join_url(&self.endpoints.geo_base_url, "direct");

        let hits: Vec<OwGeoHit> = self.get_json(url, &params).await?;

        Ok(hits
            .into_iter()
            .take(SEARCH_LIMIT)
            .map(|hit| Location::new(hit.name, hit.country, hit.state, hit.lat, hit.lon))
            .collect())
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    #[serde(default)]
    pressure: f64,
    #[serde(default)]
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
    /// Metres.
    #[serde(default)]
    visibility: f64,
}

impl OwCurrentResponse {
    fn into_current(self) -> Result<CurrentWeather, ProviderError> {
        let weather = self
            .weather
            .into_iter()
            .next()
            .ok_or(ProviderError::MalformedResponse("a weather condition"))?;

        Ok(CurrentWeather {
            temperature: round_half_up(self.main.temp) as i32,
            feels_like: round_half_up(self.main.feels_like) as i32,
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            // m/s -> km/h
            wind_speed: round_half_up(self.wind.speed * 3.6) as i32,
            wind_direction: self.wind.deg.round().clamp(0.0, 360.0) as u16,
            visibility: self.visibility / 1000.0,
            uv_index: 0.0,
            condition: weather.main,
            description: weather.description,
            icon: weather.icon,
            location: self.name,
            latitude: self.coord.lat,
            longitude: self.coord.lon,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwCity {
    /// Shift in seconds from UTC.
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

impl OwForecastResponse {
    fn into_series(self) -> Result<SampleSeries, ProviderError> {
        let utc_offset = FixedOffset::east_opt(self.city.timezone)
            .ok_or(ProviderError::MalformedResponse("a valid city timezone offset"))?;

        let samples = self
            .list
            .into_iter()
            .map(|entry| {
                let weather = entry
                    .weather
                    .into_iter()
                    .next()
                    .ok_or(ProviderError::MalformedResponse("a forecast condition"))?;

                Ok(WeatherSample {
                    timestamp: entry.dt,
                    temperature: entry.main.temp,
                    temperature_max: entry.main.temp_max,
                    temperature_min: entry.main.temp_min,
                    condition: weather.main,
                    description: weather.description,
                    icon: weather.icon,
                })
            })
            .collect::<Result<Vec<_>, ProviderError>>()?;

        Ok(SampleSeries {
            utc_offset,
            samples,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwGeoHit {
    name: String,
    country: String,
    #[serde(default)]
    state: Option<String>,
    lat: f64,
    lon: f64,
}
