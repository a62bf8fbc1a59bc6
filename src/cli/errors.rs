//! CLI-specific error types
//!
//! Table rejections keep their own `TDB_*` code so scripts see the same
//! code the library reports.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::table::{LoadError, TableError, TableErrorCode};

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout, input file)
    IoError,
    /// Input file could not be turned into a table
    LoadError,
    /// Table rejected the request
    Table(TableErrorCode),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "TDB_CLI_CONFIG_ERROR",
            Self::IoError => "TDB_CLI_IO_ERROR",
            Self::LoadError => "TDB_CLI_LOAD_ERROR",
            Self::Table(code) => code.code(),
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(CliErrorCode::ConfigError, e.to_string())
    }
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        Self::new(CliErrorCode::LoadError, e.to_string())
    }
}

impl From<TableError> for CliError {
    fn from(e: TableError) -> Self {
        Self::new(CliErrorCode::Table(e.code()), e.message())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
