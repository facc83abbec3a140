//! Store configuration.
//!
//! # Responsibility
//! - Define runtime settings: database location, asset roots, logging.
//! - Load settings from a JSON file with sensible defaults for every field.
//!
//! # Invariants
//! - A missing config file yields the defaults, not an error.
//! - Per-entity asset roots are derived from one upload root.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_DATABASE_PATH: &str = "tienda.db";
const DEFAULT_UPLOAD_ROOT: &str = "uploads";
const DEFAULT_LOG_DIR: &str = "logs";

/// Runtime configuration for the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite database file path.
    pub database_path: PathBuf,
    /// Root directory holding per-entity asset subdirectories.
    pub upload_root: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            upload_root: PathBuf::from(DEFAULT_UPLOAD_ROOT),
            log_level: default_log_level().to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a JSON file.
    ///
    /// A missing file returns defaults; an unreadable or malformed file is
    /// an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Asset root for product images.
    pub fn product_asset_root(&self) -> PathBuf {
        self.upload_root.join("products")
    }

    /// Asset root for user images.
    pub fn user_asset_root(&self) -> PathBuf {
        self.upload_root.join("users")
    }
}

/// Errors from configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "cannot parse config `{}`: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}
