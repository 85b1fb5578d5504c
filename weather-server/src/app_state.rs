// Application state for HTTP handlers
use std::sync::Arc;

use weather_core::{HourFormat, WeatherProvider};

#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
    /// Used when a forecast request carries no `hourFormat`.
    pub hour_format: HourFormat,
}
