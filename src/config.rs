//! Configuration file handling.
//!
//! This module provides loading and parsing of `.indot_query.json` configuration files.
//! Every section is optional; a missing file means all defaults. Environment
//! variables override file values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::builder::DEFAULT_GRANULARITY;
use crate::geometry::{DirectorySource, GeometryError, GeometrySource, HttpSource};

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".indot_query.json";

/// Overrides `api.base_url`.
pub const ENV_API_URL: &str = "INDOT_QUERY_API_URL";

/// Overrides `geometry` with a directory source.
pub const ENV_GEO_DIR: &str = "INDOT_QUERY_GEO_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub query: QueryDefaults,
}

/// Where the analytics API lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub query_path: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            query_path: "/api/query".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Geometry layer source variants.
///
/// JSON format uses a "type" field with lowercase variant names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GeometryConfig {
    /// `<path>/<layer>.geojson` on local disk
    Directory { path: PathBuf },
    /// `<base_url>/<layer>.geojson` over HTTP
    Http { base_url: String },
}

impl Default for GeometryConfig {
    fn default() -> Self {
        GeometryConfig::Directory {
            path: PathBuf::from("./data/geo"),
        }
    }
}

impl GeometryConfig {
    /// Build the source this configuration describes.
    pub fn to_source(&self, timeout: Duration) -> Result<Box<dyn GeometrySource>, GeometryError> {
        match self {
            Self::Directory { path } => Ok(Box::new(DirectorySource::new(path.clone()))),
            Self::Http { base_url } => Ok(Box::new(HttpSource::new(base_url.clone(), timeout)?)),
        }
    }
}

/// Defaults applied to every built query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDefaults {
    pub granularity: String,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            granularity: DEFAULT_GRANULARITY.to_string(),
        }
    }
}

impl ConfigFile {
    /// Load `.indot_query.json` from the current directory, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not valid JSON.
    pub fn load() -> Result<Self, ConfigError> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        if !path.exists() {
            debug!("no {} in current directory, using defaults", CONFIG_FILE_NAME);
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load an explicit config file. Unlike `load`, a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Explicit file if given, else the current directory's file, then
    /// environment overrides from the process environment.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides read through `var`.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.api.base_url = url;
        }
        if let Some(dir) = var(ENV_GEO_DIR).filter(|v| !v.is_empty()) {
            self.geometry = GeometryConfig::Directory {
                path: PathBuf::from(dir),
            };
        }
    }
}
