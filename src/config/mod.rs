//! Configuration management for shelfscan
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use shelfscan::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Server listening on: {}", config.server.bind_addr);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `SHELFSCAN__<section>__<key>`
//!
//! Examples:
//! - `SHELFSCAN__SERVER__BIND_ADDR=0.0.0.0:9000`
//! - `SHELFSCAN__FETCH__SYNC_TIMEOUT_SECS=30`
//! - `SHELFSCAN__EXTRACTOR__MAX_ITEMS=10`
//!
//! Two variables are read outside that scheme: `SCRAPINGBEE_API_KEY` (the
//! fetch provider secret, never stored in TOML) and `PORT` (the listen port
//! handed out by hosting platforms, default 3001).
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/shelfscan.toml`.
//! This can be overridden using the `SHELFSCAN_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{Config, ExtractorConfig, FetchConfig, ServerConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`SHELFSCAN__*`, plus `SCRAPINGBEE_API_KEY` and `PORT`)
    /// 2. TOML file (default: `config/shelfscan.toml`)
    /// 3. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file is malformed
    /// - Validation fails (zero timeouts, invalid URLs, etc.)
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
bind_addr = "127.0.0.1:4000"

[fetch]
sync_timeout_secs = 30
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:4000");
        assert_eq!(config.fetch.sync_timeout_secs, 30);
        assert_eq!(config.fetch.background_timeout_secs, 90);
    }

    #[test]
    fn test_validation_catches_zero_timeout() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[fetch]
background_timeout_secs = 0
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::InvalidTimeout { .. })
        ));
    }

    #[test]
    fn test_full_config_example() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
bind_addr = "0.0.0.0:3001"
ledger_path = "data/ledger"

[fetch]
endpoint = "https://app.scrapingbee.com/api/v1/"
target_url = "https://www.walmart.com/browse/grocery/produce/?povid=globalnav_dept_4044_Produce&ebt_eligible=true"
wait_selector = ".pa0-xl"
premium_proxy = true
sync_timeout_secs = 55
background_timeout_secs = 90

[extractor]
max_items = 15
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();

        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:3001");
        assert!(config.fetch.premium_proxy);
        assert_eq!(config.extractor.max_items, 15);
        assert!(config.fetch.api_key.is_none());
    }
}
