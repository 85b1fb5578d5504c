// HTTP request handlers
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use weather_core::{
    Coordinates, CurrentWeather, Forecast, ForecastOptions, HourFormat, Location, aggregate,
};

use crate::{app_state::AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct CoordsQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    #[serde(rename = "hourFormat")]
    pub hour_format: Option<String>,
}

impl CoordsQuery {
    fn coordinates(&self) -> Result<Coordinates, ApiError> {
        let required = || ApiError::bad_request("Latitude and longitude are required");

        let parse = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .and_then(|v| v.parse::<f64>().ok())
        };

        let lat = parse(&self.lat).ok_or_else(required)?;
        let lon = parse(&self.lon).ok_or_else(required)?;
        Coordinates::new(lat, lon).map_err(|_| required())
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current conditions at `lat`/`lon`
pub async fn current_weather(
    Query(query): Query<CoordsQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<CurrentWeather>, ApiError> {
    let coords = query.coordinates()?;

    let current = state
        .provider
        .current(coords)
        .await
        .map_err(|e| ApiError::from_provider(e, "Failed to fetch weather data"))?;

    Ok(Json(current))
}

/// Hourly (next 24h) and daily (next 5 days) forecast at `lat`/`lon`
pub async fn forecast(
    Query(query): Query<CoordsQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Forecast>, ApiError> {
    let coords = query.coordinates()?;
    let hour_format = query
        .hour_format
        .as_deref()
        .and_then(HourFormat::parse)
        .unwrap_or(state.hour_format);

    let series = state
        .provider
        .forecast(coords)
        .await
        .map_err(|e| ApiError::from_provider(e, "Failed to fetch forecast data"))?;

    debug!(samples = series.samples.len(), "aggregating forecast");
    let options = ForecastOptions {
        utc_offset: series.utc_offset,
        hour_format,
    };

    Ok(Json(aggregate(&series.samples, &options)))
}

/// Search locations by name
pub async fn search_locations(
    Query(query): Query<SearchQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Location>>, ApiError> {
    let q = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::bad_request("Search query is required"))?;

    let locations = state
        .provider
        .search(q)
        .await
        .map_err(|e| ApiError::from_provider(e, "Failed to search locations"))?;

    Ok(Json(locations))
}
