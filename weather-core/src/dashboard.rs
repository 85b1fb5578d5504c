//! Event-driven dashboard state.
//!
//! Data is fetched only for [`DashboardEvent::LocationSelected`] and
//! [`DashboardEvent::Refresh`]; the display model is recomputed from the last
//! snapshot on every call to [`Dashboard::view`].

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    classify::{
        Category, ParticleKind, ThemeId, UvLevel, classify_daily_icon, classify_icon,
        classify_particles, classify_theme, uv_level,
    },
    error::ProviderError,
    forecast::{ForecastOptions, HourFormat, aggregate},
    model::{Coordinates, CurrentWeather, Forecast},
    provider::WeatherProvider,
    units::{Units, convert_temperature},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashboardEvent {
    LocationSelected(Coordinates),
    Refresh,
    ToggleUnits,
    SetUnits(Units),
}

#[derive(Debug, Clone)]
struct Snapshot {
    current: CurrentWeather,
    forecast: Forecast,
}

#[derive(Debug)]
pub struct Dashboard<P> {
    provider: P,
    units: Units,
    hour_format: HourFormat,
    location: Option<Coordinates>,
    snapshot: Option<Snapshot>,
}

impl<P: WeatherProvider> Dashboard<P> {
    pub fn new(provider: P, units: Units, hour_format: HourFormat) -> Self {
        Self {
            provider,
            units,
            hour_format,
            location: None,
            snapshot: None,
        }
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    /// Apply an event. On a failed fetch the previous location and snapshot
    /// are both kept.
    pub async fn handle(&mut self, event: DashboardEvent) -> Result<(), ProviderError> {
        match event {
            DashboardEvent::LocationSelected(coords) => {
                self.reload(coords).await?;
                self.location = Some(coords);
                Ok(())
            }
            DashboardEvent::Refresh => match self.location {
                Some(coords) => self.reload(coords).await,
                None => {
                    debug!("refresh requested before a location was selected");
                    Ok(())
                }
            },
            DashboardEvent::ToggleUnits => {
                self.units = self.units.toggle();
                Ok(())
            }
            DashboardEvent::SetUnits(units) => {
                self.units = units;
                Ok(())
            }
        }
    }

    async fn reload(&mut self, coords: Coordinates) -> Result<(), ProviderError> {
        let (current, series) =
            tokio::try_join!(self.provider.current(coords), self.provider.forecast(coords))
                .inspect_err(|err| warn!(error = %err, "failed to refresh weather"))?;

        let options = ForecastOptions {
            utc_offset: series.utc_offset,
            hour_format: self.hour_format,
        };

        self.snapshot = Some(Snapshot {
            current,
            forecast: aggregate(&series.samples, &options),
        });

        Ok(())
    }

    /// Build the display model for a viewer whose wall clock reads `local_hour`.
    pub fn view(&self, local_hour: u32) -> Option<DashboardView> {
        let snapshot = self.snapshot.as_ref()?;
        let units = self.units;
        let current = &snapshot.current;
        let temp = |celsius: i32| convert_temperature(f64::from(celsius), units);

        Some(DashboardView {
            units,
            unit_symbol: units.symbol(),
            theme: classify_theme(Some(&current.condition), local_hour),
            particles: classify_particles(Some(&current.condition)),
            current: CurrentView {
                location: current.location.clone(),
                temperature: temp(current.temperature),
                feels_like: temp(current.feels_like),
                condition: current.condition.clone(),
                description: current.description.clone(),
                category: classify_icon(&current.condition, &current.icon),
                humidity: current.humidity,
                wind_speed: current.wind_speed,
                pressure: current.pressure,
                visibility: current.visibility,
                uv_index: current.uv_index,
                uv_level: uv_level(current.uv_index),
            },
            hourly: snapshot
                .forecast
                .hourly
                .iter()
                .map(|hour| HourlyView {
                    time: hour.time.clone(),
                    temperature: temp(hour.temperature),
                    category: classify_icon(&hour.condition, &hour.icon),
                })
                .collect(),
            daily: snapshot
                .forecast
                .daily
                .iter()
                .map(|day| DailyView {
                    day: day.day.clone(),
                    high: temp(day.high),
                    low: temp(day.low),
                    description: day.description.clone(),
                    category: classify_daily_icon(&day.condition),
                })
                .collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub units: Units,
    pub unit_symbol: &'static str,
    pub theme: ThemeId,
    pub particles: ParticleKind,
    pub current: CurrentView,
    pub hourly: Vec<HourlyView>,
    pub daily: Vec<DailyView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    pub location: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: String,
    pub description: String,
    pub category: Category,
    pub humidity: u8,
    /// km/h
    pub wind_speed: i32,
    pub pressure: f64,
    pub visibility: f64,
    pub uv_index: f64,
    pub uv_level: UvLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyView {
    pub time: String,
    pub temperature: f64,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyView {
    pub day: String,
    pub high: f64,
    pub low: f64,
    pub description: String,
    pub category: Category,
}
