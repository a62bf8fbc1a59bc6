//! Configuration file
//!
//! A single JSON object; every field is optional:
//!
//! ```json
//! {
//!   "delimiter": ",",
//!   "index_marker": "*",
//!   "sort_field_policy": "ignore",
//!   "log_level": "warn"
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::planner::SortFieldPolicy;
use crate::schema::{DEFAULT_DELIMITER, DEFAULT_INDEX_MARKER};
use crate::table::LoadOptions;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid JSON for `Config`
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values parse but contradict each other
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Column separator for delimited input
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Header suffix marking an indexed column
    #[serde(default = "default_index_marker")]
    pub index_marker: char,

    /// Handling of sort criteria that name unknown fields
    #[serde(default)]
    pub sort_field_policy: SortFieldPolicy,

    /// Minimum severity written to the log
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

fn default_index_marker() -> char {
    DEFAULT_INDEX_MARKER
}

fn default_log_level() -> Severity {
    Severity::Warn
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            index_marker: default_index_marker(),
            sort_field_policy: SortFieldPolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content)?;

        log_event_with_fields(
            Event::ConfigLoaded,
            &[("path", &*path.to_string_lossy())],
        );
        Ok(config)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field combinations
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delimiter == self.index_marker {
            return Err(ConfigError::Invalid(format!(
                "delimiter and index_marker must differ (both '{}')",
                self.delimiter
            )));
        }

        for (name, value) in [("delimiter", self.delimiter), ("index_marker", self.index_marker)] {
            if value == '\n' || value == '\r' {
                return Err(ConfigError::Invalid(format!("{} must not be a line break", name)));
            }
        }

        Ok(())
    }

    /// Install the configured log level process-wide
    pub fn apply_logging(&self) {
        Logger::set_min_severity(self.log_level);
    }

    /// Parsing options for delimited input
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter,
            index_marker: self.index_marker,
            sort_field_policy: self.sort_field_policy,
        }
    }
}
