// Main entry point - configuration, provider wiring and server setup
mod app_state;
mod error;
mod handlers;
mod routes;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use weather_core::{Config, provider_from_config};

use crate::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = Config::load()?;
    config.apply_env();

    if !config.is_configured() {
        warn!("OpenWeatherMap API key not found. Weather data will not be available.");
    }

    let provider = provider_from_config(&config).context("Failed to build weather client")?;

    let state = Arc::new(AppState {
        provider: Arc::new(provider),
        hour_format: config.hour_format,
    });

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", config.server.bind))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "weather-server listening");

    axum::serve(listener, routes::router(state)).await?;

    Ok(())
}
