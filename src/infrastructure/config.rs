//! Configuration management

use crate::error::{GateError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the per-store metadata directory
pub const META_DIR: &str = ".commentgate";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub created: DateTime<Utc>,
    /// Fields requested when a read names none
    #[serde(default = "default_fields")]
    pub default_fields: Vec<String>,
    /// tracing filter directive, e.g. "info" or "commentgate=debug"
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_fields() -> Vec<String> {
    ["name", "comment", "dateAdded", "commentAuthor"]
        .iter()
        .map(|f| f.to_string())
        .collect()
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            created: Utc::now(),
            default_fields: default_fields(),
            log_filter: default_log_filter(),
        }
    }

    /// Load config from .commentgate/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(META_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GateError::NotInitialized(path.to_path_buf())
            } else {
                GateError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| GateError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .commentgate/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let meta_dir = path.join(META_DIR);
        let config_path = meta_dir.join("config.toml");

        if !meta_dir.exists() {
            fs::create_dir(&meta_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Log filter, with COMMENTGATE_LOG taking precedence over the file
    pub fn effective_log_filter(&self) -> String {
        std::env::var("COMMENTGATE_LOG").unwrap_or_else(|_| self.log_filter.clone())
    }
}
