// src/config.rs

//! Application configuration structures.
//!
//! Configuration is optional: every field has a sensible default, so the tool
//! runs without a config file. The DataMall account key is deliberately not
//! part of the config; it is read from the `DATAMALL_ACCOUNT_KEY` environment
//! variable by the CLI.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Output file and database locations
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Config load failed from {:?}: {}. Using defaults.", path, e);
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.stops_endpoint.trim().is_empty() {
            return Err(AppError::validation("api.stops_endpoint is empty"));
        }
        if self.api.routes_endpoint.trim().is_empty() {
            return Err(AppError::validation("api.routes_endpoint is empty"));
        }
        Ok(())
    }
}

/// HTTP client and endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Bus stops resource endpoint
    #[serde(default = "defaults::stops_endpoint")]
    pub stops_endpoint: String,

    /// Bus routes resource endpoint
    #[serde(default = "defaults::routes_endpoint")]
    pub routes_endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            stops_endpoint: defaults::stops_endpoint(),
            routes_endpoint: defaults::routes_endpoint(),
        }
    }
}

/// Output file and database locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Bus stops artifact file
    #[serde(default = "defaults::stops_file")]
    pub stops_file: String,

    /// Bus routes artifact file
    #[serde(default = "defaults::routes_file")]
    pub routes_file: String,

    /// SQLite database file
    #[serde(default = "defaults::database")]
    pub database: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            stops_file: defaults::stops_file(),
            routes_file: defaults::routes_file(),
            database: defaults::database(),
        }
    }
}

/// Default values for configuration fields.
mod defaults {
    pub fn user_agent() -> String {
        format!("datamall-ingest/{}", env!("CARGO_PKG_VERSION"))
    }

    pub fn timeout() -> u64 {
        30
    }

    pub fn stops_endpoint() -> String {
        "http://datamall2.mytransport.sg/ltaodataservice/BusStops".to_string()
    }

    pub fn routes_endpoint() -> String {
        "http://datamall2.mytransport.sg/ltaodataservice/BusRoutes".to_string()
    }

    pub fn stops_file() -> String {
        "./bus_stops.json".to_string()
    }

    pub fn routes_file() -> String {
        "./bus_routes.json".to_string()
    }

    pub fn database() -> String {
        "./datamall.sqlite".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.api.timeout_secs, 5);
        assert!(config.api.stops_endpoint.contains("BusStops"));
        assert_eq!(config.paths.database, "./datamall.sqlite");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("does/not/exist.toml");
        assert_eq!(config.api.timeout_secs, 30);
    }
}
