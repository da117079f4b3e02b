//! Application configuration
//!
//! Configuration is a JSON document with camelCase keys. Every field has a
//! default, so a missing file or a partial document is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default sentinel for arguments that could not be extracted
pub const DEFAULT_MISSING_ARGUMENT_PLACEHOLDER: &str = "N/A";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value failed validation
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Shown by destinations whose required argument is missing
    #[serde(default = "default_placeholder")]
    pub missing_argument_placeholder: String,

    /// Default `tracing` filter when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Name used in the dashboard greeting
    #[serde(default = "default_courier_name")]
    pub courier_name: String,
}

fn default_placeholder() -> String {
    DEFAULT_MISSING_ARGUMENT_PLACEHOLDER.to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_courier_name() -> String {
    "Mensajero".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            missing_argument_placeholder: default_placeholder(),
            log_filter: default_log_filter(),
            courier_name: default_courier_name(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    ///
    /// A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field constraints
    pub fn validate(&self) -> Result<()> {
        if self.missing_argument_placeholder.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "missingArgumentPlaceholder",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Set the missing-argument placeholder
    pub fn missing_argument_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.missing_argument_placeholder = placeholder.into();
        self
    }

    /// Set the courier name
    pub fn courier_name(mut self, name: impl Into<String>) -> Self {
        self.courier_name = name.into();
        self
    }
}
