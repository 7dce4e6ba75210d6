//! Application configuration.
//!
//! Settings come from an optional TOML file. Every section is optional:
//!
//! ```toml
//! [logging]
//! level = "debug"
//! file = "solar.log"
//!
//! [[cities]]
//! name = "Palermo"
//! irradiance = 5.20
//! ```
//!
//! A file without `[[cities]]` keeps the built-in reference table.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use solar_core::{City, CityTable};
use thiserror::Error;
use tracing::{debug, info};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "solar-estimator.toml";

/// Errors raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; ignored when `RUST_LOG` is set.
    pub level: Option<String>,
    /// File receiving log output, in addition to the console.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Replacement city table; empty means "use the reference table".
    #[serde(default)]
    pub cities: Vec<City>,
}

impl AppConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads configuration from `path`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the configuration for this run.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read if present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                info!(path = %path.display(), "loading configuration");
                Ok(Self::from_file(path)?)
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    info!(path = %default_path.display(), "loading configuration");
                    Ok(Self::from_file(default_path)?)
                } else {
                    debug!("no configuration file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// The city table for this run.
    pub fn city_table(&self) -> Result<CityTable> {
        if self.cities.is_empty() {
            return Ok(CityTable::reference());
        }
        CityTable::new(self.cities.clone()).context("invalid [[cities]] table in configuration")
    }
}
