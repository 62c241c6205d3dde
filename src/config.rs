//! Runtime configuration: defaults, optional TOML file, then environment.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

pub const ENV_BASE_URL: &str = "SALON_BASE_URL";
pub const ENV_STORAGE_PATH: &str = "SALON_STORAGE_PATH";
pub const ENV_REQUEST_TIMEOUT: &str = "SALON_REQUEST_TIMEOUT_SECS";
pub const ENV_SUBMIT_DELAY: &str = "SALON_SUBMIT_DELAY_MS";
pub const ENV_CLOSED_DAY: &str = "SALON_CLOSED_DAY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Site root the `data/*.json` collections are fetched from.
    pub base_url: String,
    /// JSON document standing in for the browser's local storage.
    pub storage_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Overrides the per-form confirmation delay when set.
    pub submit_delay_ms: Option<u64>,
    pub closed_day: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
            storage_path: PathBuf::from("salon-storage.json"),
            request_timeout_secs: 8,
            user_agent: concat!("salon-site/", env!("CARGO_PKG_VERSION")).to_string(),
            submit_delay_ms: None,
            closed_day: "Sunday".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then `path` (if any), then `.env` and process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.closed_weekday()?;

        info!(base_url = %config.base_url, storage = %config.storage_path.display(), "Configuration loaded");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply `SALON_*` overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(path) = lookup(ENV_STORAGE_PATH) {
            self.storage_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT) {
            self.request_timeout_secs = parse_number(ENV_REQUEST_TIMEOUT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SUBMIT_DELAY) {
            self.submit_delay_ms = Some(parse_number(ENV_SUBMIT_DELAY, &raw)?);
        }
        if let Some(day) = lookup(ENV_CLOSED_DAY) {
            self.closed_day = day;
        }
        debug!(config = ?self, "Environment overrides applied");
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn submit_delay(&self) -> Option<Duration> {
        self.submit_delay_ms.map(Duration::from_millis)
    }

    pub fn closed_weekday(&self) -> Result<Weekday, ConfigError> {
        self.closed_day
            .trim()
            .parse::<Weekday>()
            .map_err(|_| ConfigError::InvalidValue {
                key: "closed_day".to_string(),
                value: self.closed_day.clone(),
            })
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(8));
        assert_eq!(config.closed_weekday().unwrap(), Weekday::Sun);
        assert!(config.submit_delay().is_none());
    }

    #[test]
    fn toml_fills_missing_fields_with_defaults() {
        let config = Config::from_toml(
            r#"
            base_url = "https://spikesalon.example/"
            submit_delay_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://spikesalon.example/");
        assert_eq!(config.submit_delay(), Some(Duration::ZERO));
        assert_eq!(config.storage_path, PathBuf::from("salon-storage.json"));
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://127.0.0.1:9000"),
            (ENV_REQUEST_TIMEOUT, "3"),
            (ENV_CLOSED_DAY, "Monday"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.closed_weekday().unwrap(), Weekday::Mon);
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_env(|key| (key == ENV_SUBMIT_DELAY).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn bad_closed_day_is_rejected() {
        let config = Config {
            closed_day: "Funday".into(),
            ..Config::default()
        };
        assert!(config.closed_weekday().is_err());
    }
}
