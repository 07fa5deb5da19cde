use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::warn;

use crate::error::ConfigError;

pub const ENV_BASE_URL: &str = "WEATHER_API_BASE_URL";
pub const ENV_API_KEY: &str = "OPENWEATHER_API_KEY";
pub const ENV_CACHE_EXPIRY: &str = "FORECAST_CACHE_EXPIRY";

pub const DEFAULT_CACHE_EXPIRY_MINUTES: u64 = 30;

fn default_cache_expiry_minutes() -> u64 {
    DEFAULT_CACHE_EXPIRY_MINUTES
}

/// Provider settings and cache lifetime.
///
/// Example TOML:
/// ```toml
/// base_url = "https://api.openweathermap.org/data/2.5/weather"
/// api_key = "..."
/// cache_expiry_minutes = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_cache_expiry_minutes")]
    pub cache_expiry_minutes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            cache_expiry_minutes: DEFAULT_CACHE_EXPIRY_MINUTES,
        }
    }
}

impl Config {
    /// Load the config file (or defaults) and apply environment overrides.
    pub fn resolve() -> Result<Self> {
        Ok(Self::load()?.with_env_overrides())
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Override file values with the process environment.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_env(|name| std::env::var(name).ok());
        self
    }

    /// Override file values with whatever `lookup` returns for the known variables.
    ///
    /// Blank values are ignored. An expiry that is not a whole number of minutes
    /// is ignored with a warning.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = present(ENV_BASE_URL) {
            self.base_url = Some(url.trim().to_owned());
        }
        if let Some(key) = present(ENV_API_KEY) {
            self.api_key = Some(key.trim().to_owned());
        }
        if let Some(raw) = present(ENV_CACHE_EXPIRY) {
            match raw.trim().parse::<u64>() {
                Ok(minutes) => self.cache_expiry_minutes = minutes,
                Err(_) => warn!(
                    value = %raw,
                    default = self.cache_expiry_minutes,
                    "ignoring invalid {ENV_CACHE_EXPIRY}"
                ),
            }
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_expiry_minutes.saturating_mul(60))
    }

    pub fn base_url(&self) -> Option<&str> {
        non_blank(self.base_url.as_deref())
    }

    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }

    /// First missing provider setting; the base URL is reported before the key.
    pub fn missing(&self) -> Option<ConfigError> {
        if self.base_url().is_none() {
            Some(ConfigError::MissingBaseUrl)
        } else if self.api_key().is_none() {
            Some(ConfigError::MissingApiKey)
        } else {
            None
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
