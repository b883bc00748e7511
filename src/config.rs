//! Configuration management for the window lab.
//!
//! Handles loading display and logging settings from a TOML file. A missing
//! file means defaults.

use crate::error::{LabError, Result};
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Result rendering settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Log filter settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Result rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Output format: "text" or "json".
    #[serde(default)]
    pub format: OutputFormat,

    /// Rows shown before the text renderer truncates.
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

fn default_max_rows() -> usize {
    100
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            max_rows: default_max_rows(),
        }
    }
}

/// Log filter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (e.g. "info",
    /// "sql_windowlab=debug").
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sql-windowlab")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| LabError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            LabError::config(format!(
                "Invalid config file {}:\n  {}",
                path.display(),
                e
            ))
        })?;

        if config.display.max_rows == 0 {
            return Err(LabError::config(format!(
                "Invalid config file {}:\n  display.max_rows must be at least 1",
                path.display()
            )));
        }

        Ok(config)
    }
}
