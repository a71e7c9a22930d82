//! Client configuration.
//!
//! Loaded from a TOML file; every section and field has a default, so a
//! missing file or an empty one yields a working configuration.
//!
//! ```toml
//! [service]
//! base_url = "http://localhost:5000"
//!
//! [logging]
//! default_level = "info"
//!
//! [logging.modules]
//! "u_dispatch::client" = "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::logging::LoggingConfig;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "u-dispatch.toml";
/// Names an alternative config file.
pub const CONFIG_PATH_ENV: &str = "U_DISPATCH_CONFIG";
/// Overrides `service.base_url`.
pub const BASE_URL_ENV: &str = "U_DISPATCH_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the scheduling service lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL; `/process` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ClientConfig {
    /// Loads the config named by `U_DISPATCH_CONFIG` (or the default
    /// path), then applies `U_DISPATCH_URL`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        let mut config = Self::from_path(&path)?;
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            config.service.base_url = url;
        }
        Ok(config)
    }

    /// Loads from `path`; a missing file yields defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
