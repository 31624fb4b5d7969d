//! Configuration management for regdesk.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "regdesk";

/// Default CSV file name, relative to the working directory.
const CSV_FILE_NAME: &str = "registrations.csv";

/// Default database file name, relative to the working directory.
const DATABASE_FILE_NAME: &str = "registrations.db";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "REGDESK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `REGDESK_`, sections split by `__`)
/// 2. TOML config file at `~/.config/regdesk/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Event presentation.
    pub event: EventConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the CSV file.
    /// Defaults to `registrations.csv` in the working directory.
    pub csv_path: Option<PathBuf>,
    /// Path to the database file.
    /// Defaults to `registrations.db` in the working directory.
    pub database_path: Option<PathBuf>,
}

/// Text shown around every view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Page header.
    pub title: String,
    /// Page footer.
    pub footer: String,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            title: "FutureTech2025: Innovation & AI Workshop".to_string(),
            footer: "\u{a9} 2025 FutureTech Workshop".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self
            .storage
            .csv_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(Error::config_validation("csv_path must not be empty"));
        }

        if self
            .storage
            .database_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(Error::config_validation("database_path must not be empty"));
        }

        if self.csv_path() == self.database_path() {
            return Err(Error::ConfigValidation {
                message: format!(
                    "csv_path and database_path must differ (both are {})",
                    self.csv_path().display()
                ),
            });
        }

        Ok(())
    }

    /// Get the CSV path, resolving defaults if not set.
    #[must_use]
    pub fn csv_path(&self) -> PathBuf {
        self.storage
            .csv_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(CSV_FILE_NAME))
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
    }
}
