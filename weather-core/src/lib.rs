//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - Forecast aggregation (3-hour samples into hourly and daily summaries)
//! - Condition classification (icon category, background theme, particles)
//! - Temperature unit conversion
//! - The provider abstraction and its OpenWeather client
//! - Configuration & credentials handling
//! - An event-driven dashboard model shared by front ends
//!
//! It is used by `weather-cli` and `weather-server`.

pub mod classify;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod units;

pub use classify::{Category, ParticleKind, ThemeId, UvLevel, classify_icon, classify_theme};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardEvent, DashboardView};
pub use error::ProviderError;
pub use forecast::{ForecastOptions, HourFormat, aggregate};
pub use model::{
    Coordinates, CurrentWeather, DailySummary, Forecast, HourlySummary, Location, SampleSeries,
    WeatherSample,
};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use units::{Units, convert_temperature};
