//! Configuration management for the Zeus host.
//!
//! Loads the host configuration from TOML, applies command-line overrides and
//! validates the result.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::CliArgs;

/// Log levels accepted by the diagnostics subscriber.
pub const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Destinations accepted for `[ZEUS]` lines.
pub const VALID_SINKS: [&str; 2] = ["console", "tracing"];

/// Errors that can occur while loading or validating the host configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Configuration validation failed: {0}")]
    Invalid(String),
}

/// Host configuration loaded from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the mod package lives
    #[serde(rename = "mod")]
    pub package: PackageSettings,
    /// Logging configuration settings
    pub logging: LoggingSettings,
}

/// Location of the mod manifest and the package it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSettings {
    /// Path to the mod manifest file
    pub manifest: String,
    /// Directory the manifest's script module paths are resolved against
    pub root: String,
}

/// Logging system configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Diagnostics level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Whether diagnostics are written as JSON
    #[serde(default)]
    pub json_format: bool,
    /// Destination for `[ZEUS]` lines (console, tracing)
    #[serde(default = "default_sink")]
    pub sink: String,
}

fn default_sink() -> String {
    "console".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            package: PackageSettings {
                manifest: "zeus_mod.toml".to_string(),
                root: ".".to_string(),
            },
            logging: LoggingSettings {
                level: "info".to_string(),
                json_format: false,
                sink: default_sink(),
            },
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, creates a default configuration file at the
    /// specified path and returns the default configuration.
    pub async fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            Ok(toml::from_str(&content)?)
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            tokio::fs::write(path, toml_content).await?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Applies command-line overrides on top of the file settings.
    pub fn apply_overrides(&mut self, args: &CliArgs) {
        if let Some(manifest) = &args.manifest_path {
            self.package.manifest = manifest.to_string_lossy().to_string();
        }
        if let Some(root) = &args.root_dir {
            self.package.root = root.to_string_lossy().to_string();
        }
        if let Some(level) = &args.log_level {
            self.logging.level = level.clone();
        }
        if args.json_logs {
            self.logging.json_format = true;
        }
        if let Some(sink) = &args.sink {
            self.logging.sink = sink.clone();
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        PathBuf::from(&self.package.manifest)
    }

    pub fn root_dir(&self) -> PathBuf {
        PathBuf::from(&self.package.root)
    }

    /// Validates the configuration for consistency and correctness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.package.manifest.is_empty() {
            return Err(ConfigError::Invalid("Manifest path cannot be empty".to_string()));
        }
        if self.package.root.is_empty() {
            return Err(ConfigError::Invalid("Package root cannot be empty".to_string()));
        }

        if !VALID_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {VALID_LEVELS:?}",
                &self.logging.level
            )));
        }

        if !VALID_SINKS.contains(&self.logging.sink.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid sink: {}. Must be one of: {VALID_SINKS:?}",
                &self.logging.sink
            )));
        }

        Ok(())
    }
}
