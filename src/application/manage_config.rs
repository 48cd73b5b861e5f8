//! Config management use case

use crate::error::{GateError, Result};
use crate::infrastructure::{Config, FileSystemRepository};
use tracing_subscriber::EnvFilter;

/// Service for managing store configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "default_fields" => Ok(config.default_fields.join(",")),
            "log_filter" => Ok(config.log_filter),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(GateError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: default_fields, log_filter, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "default_fields" => {
                config.default_fields = value
                    .split(',')
                    .map(str::trim)
                    .filter(|field| !field.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "log_filter" => {
                EnvFilter::try_new(value).map_err(|e| {
                    GateError::Config(format!("Invalid log filter '{}': {}", value, e))
                })?;
                config.log_filter = value.to_string();
            }
            "created" => {
                return Err(GateError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(GateError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: default_fields, log_filter",
                    key
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
