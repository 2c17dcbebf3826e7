//! Configuration management and validation.
//!
//! Provides configuration structures for ingest limits and export
//! behavior, loaded from an optional JSON file and overridden by CLI
//! arguments.

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DATA_DIR, DEFAULT_MAX_ROWS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Ingest settings for upload parsing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Ceiling on data rows accepted from a single upload; exceeding it
    /// fails fast with a reported diagnostic
    pub max_rows: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

/// Export settings for chart data files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Pretty-print JSON output (the static data files are indented)
    pub pretty_json: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { pretty_json: true }
    }
}

/// Global configuration for the incident aggregator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding chart data files (static fallback set and
    /// freshly written output)
    pub data_dir: PathBuf,

    /// Ingest settings
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            ingest: IngestConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    /// Default config file location under the platform config root
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                Error::configuration("Could not determine platform configuration directory")
            })
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        let config: Config = serde_json::from_str(&content).map_err(|e| {
            Error::json(
                format!("Failed to parse config file {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration in layers: explicit file, default file location,
    /// or built-in defaults when neither exists.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_file {
            debug!("Loading configuration from {}", path.display());
            return Self::load_from_file(path);
        }

        match Self::default_config_path() {
            Ok(path) if path.exists() => {
                debug!("Loading configuration from default path {}", path.display());
                Self::load_from_file(&path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Set the chart data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Set the upload row ceiling
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.ingest.max_rows = max_rows;
        self
    }

    /// Disable JSON pretty-printing
    pub fn with_compact_json(mut self) -> Self {
        self.export.pretty_json = false;
        self
    }

    /// Validate configuration values for consistency
    pub fn validate(&self) -> Result<()> {
        if self.ingest.max_rows == 0 {
            return Err(Error::configuration(
                "Upload row limit must be greater than 0",
            ));
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(Error::configuration("Data directory cannot be empty"));
        }

        Ok(())
    }
}
