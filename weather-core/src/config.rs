use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{forecast::HourFormat, units::Units};

pub const DEFAULT_API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_GEO_BASE_URL: &str = "https://api.openweathermap.org/geo/1.0";
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";

/// Environment variables consulted, in order, for the OpenWeather key.
pub const API_KEY_ENV_VARS: &[&str] = &["OPENWEATHER_API_KEY", "VITE_OPENWEATHER_API_KEY"];
pub const BIND_ENV_VAR: &str = "WEATHER_SERVER_BIND";

/// Upstream endpoints. Overridable so tests and proxies can point elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoints {
    pub api_base_url: String,
    pub geo_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            geo_base_url: DEFAULT_GEO_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "imperial"
/// hour_format = "twentyfour"
///
/// [server]
/// bind = "127.0.0.1:8080"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default)]
    pub units: Units,

    #[serde(default)]
    pub hour_format: HourFormat,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub endpoints: Endpoints,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            units: Units::default(),
            hour_format: HourFormat::default(),
            timeout_secs: default_timeout_secs(),
            endpoints: Endpoints::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Apply overrides using `lookup` to resolve variable names.
    ///
    /// Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = API_KEY_ENV_VARS.iter().copied().find_map(&non_empty) {
            self.api_key = Some(key);
        }

        if let Some(bind) = non_empty(BIND_ENV_VAR) {
            self.server.bind = bind;
        }
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string()).filter(|k| !k.is_empty());
    }

    /// Returns the API key, if one is configured.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}
