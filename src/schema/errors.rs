//! Schema error types
//!
//! Error codes:
//! - TDB_SCHEMA_INVALID (REJECT)

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Request rejected, table unchanged
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Schema has no indexed field, an empty name or a duplicate name
    TdbSchemaInvalid,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::TdbSchemaInvalid => "TDB_SCHEMA_INVALID",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error type with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    field: Option<String>,
}

impl SchemaError {
    /// Schema declares no indexed field
    pub fn no_indexed_field() -> Self {
        Self {
            code: SchemaErrorCode::TdbSchemaInvalid,
            message: "Schema must contain at least one indexed field".to_string(),
            field: None,
        }
    }

    /// Schema declares a field with an empty name
    pub fn empty_field_name(position: usize) -> Self {
        Self {
            code: SchemaErrorCode::TdbSchemaInvalid,
            message: format!("Field at position {} has an empty name", position),
            field: None,
        }
    }

    /// Schema declares the same field name twice
    pub fn duplicate_field(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: SchemaErrorCode::TdbSchemaInvalid,
            message: format!("Duplicate field name '{}'", name),
            field: Some(name),
        }
    }

    /// Header line could not be turned into a schema
    pub fn malformed_header(reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::TdbSchemaInvalid,
            message: format!("Malformed header: {}", reason.into()),
            field: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending field name, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
