// Router wiring
use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    app_state::AppState,
    handlers::{current_weather, forecast, health_check, search_locations},
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/weather/current", get(current_weather))
        .route("/api/weather/forecast", get(forecast))
        .route("/api/weather/search", get(search_locations))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
