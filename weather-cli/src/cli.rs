use std::time::Duration;

use anyhow::{Context, anyhow};
use chrono::{Local, Timelike};
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use weather_core::{
    Config, Coordinates, Dashboard, DashboardEvent, HourFormat, Location, OpenWeatherProvider,
    Units, WeatherProvider, provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather dashboard CLI")]
pub struct Cli {
    /// Log provider traffic to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key and display preferences.
    Configure,

    /// Search locations by name.
    Search {
        /// City or place name.
        query: String,
    },

    /// Show current conditions and forecasts.
    Show {
        /// Place name; resolved with a location search.
        query: Option<String>,

        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Display units, overriding the configured default.
        #[arg(long)]
        units: Option<Units>,

        /// Keep running and refresh every N minutes (default 5).
        #[arg(long, num_args = 0..=1, default_missing_value = "5")]
        watch: Option<u64>,
    },
}

impl Cli {
    pub fn init_logging(&self) {
        let default = if self.verbose { "weather_core=debug,info" } else { "warn" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        config.apply_env();

        match self.command {
            Command::Configure => configure(config),
            Command::Search { query } => {
                let provider = build_provider(&config)?;
                let hits = provider.search(&query).await?;
                print!("{}", render::locations(&hits));
                Ok(())
            }
            Command::Show {
                query,
                lat,
                lon,
                units,
                watch,
            } => {
                let provider = build_provider(&config)?;
                let coords = match (lat, lon, query) {
                    (Some(lat), Some(lon), _) => Coordinates::new(lat, lon)?,
                    (_, _, Some(query)) => resolve_location(&provider, &query).await?,
                    _ => return Err(anyhow!("Provide a place name or both --lat and --lon.")),
                };

                let units = units.unwrap_or(config.units);
                show(provider, coords, units, config.hour_format, watch).await
            }
        }
    }
}

fn build_provider(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    if !config.is_configured() {
        return Err(anyhow!(
            "No OpenWeather API key configured.\n\
             Hint: run `weather configure` or set OPENWEATHER_API_KEY."
        ));
    }
    Ok(provider_from_config(config)?)
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Text::new("OpenWeather API key:")
        .with_default(config.api_key().unwrap_or_default())
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let units = Select::new("Default units:", vec![Units::Metric, Units::Imperial])
        .with_starting_cursor(usize::from(config.units == Units::Imperial))
        .prompt()
        .context("Failed to read units")?;
    config.units = units;

    let formats = vec!["12-hour (3 PM)", "24-hour (15:00)"];
    let format = Select::new("Hour format:", formats)
        .with_starting_cursor(usize::from(config.hour_format == HourFormat::TwentyFour))
        .prompt()
        .context("Failed to read hour format")?;
    config.hour_format = if format.starts_with("24") {
        HourFormat::TwentyFour
    } else {
        HourFormat::Twelve
    };

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn resolve_location<P: WeatherProvider>(
    provider: &P,
    query: &str,
) -> anyhow::Result<Coordinates> {
    let mut hits = provider.search(query).await?;

    let chosen = match hits.len() {
        0 => return Err(anyhow!("No locations found for '{query}'.")),
        1 => hits.remove(0),
        _ => pick_location(hits)?,
    };

    info!(location = %chosen.display_name, "resolved location");
    Ok(chosen.coordinates()?)
}

fn pick_location(hits: Vec<Location>) -> anyhow::Result<Location> {
    Select::new("Several places match, pick one:", hits)
        .prompt()
        .context("Failed to read location choice")
}

async fn show<P: WeatherProvider>(
    provider: P,
    coords: Coordinates,
    units: Units,
    hour_format: HourFormat,
    watch: Option<u64>,
) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(provider, units, hour_format);
    dashboard
        .handle(DashboardEvent::LocationSelected(coords))
        .await
        .context("Unable to fetch weather data")?;
    print_view(&dashboard);

    let Some(minutes) = watch else {
        return Ok(());
    };

    let period = Duration::from_secs(minutes.max(1) * 60);
    let mut ticker = tokio::time::interval(period);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match dashboard.handle(DashboardEvent::Refresh).await {
                    Ok(()) => print_view(&dashboard),
                    Err(err) => warn!(error = %err, "refresh failed, keeping last data"),
                }
            }
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

fn print_view<P: WeatherProvider>(dashboard: &Dashboard<P>) {
    let now = Local::now();
    if let Some(view) = dashboard.view(now.hour()) {
        print!("{}", render::dashboard(&view));
    }
    if let Some(coords) = dashboard.location() {
        let updated = now.format("%H:%M").to_string();
        println!("{}", render::status(coords, dashboard.units(), &updated));
    }
}
