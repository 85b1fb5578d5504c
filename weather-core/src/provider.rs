use crate::{
    Config,
    error::ProviderError,
    model::{Coordinates, CurrentWeather, Location, SampleSeries},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc, time::Duration};

pub mod openweather;

/// Maximum number of geocoding hits returned by a search.
pub const SEARCH_LIMIT: usize = 5;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions at `coords`.
    async fn current(&self, coords: Coordinates) -> Result<CurrentWeather, ProviderError>;

    /// Raw 3-hour forecast samples at `coords`, ascending by timestamp.
    async fn forecast(&self, coords: Coordinates) -> Result<SampleSeries, ProviderError>;

    /// Places matching a free-text name, at most [`SEARCH_LIMIT`].
    async fn search(&self, query: &str) -> Result<Vec<Location>, ProviderError>;
}

#[async_trait]
impl<P: WeatherProvider + ?Sized> WeatherProvider for Arc<P> {
    async fn current(&self, coords: Coordinates) -> Result<CurrentWeather, ProviderError> {
        (**self).current(coords).await
    }

    async fn forecast(&self, coords: Coordinates) -> Result<SampleSeries, ProviderError> {
        (**self).forecast(coords).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Location>, ProviderError> {
        (**self).search(query).await
    }
}

/// Construct the OpenWeather provider from config.
///
/// A missing API key is not an error here; every request made without one
/// fails with [`ProviderError::MissingApiKey`].
pub fn provider_from_config(config: &Config) -> Result<OpenWeatherProvider, ProviderError> {
    OpenWeatherProvider::new(
        config.api_key().map(str::to_owned),
        config.endpoints.clone(),
        Duration::from_secs(config.timeout_secs),
    )
}
