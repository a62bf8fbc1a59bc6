//! Table error types
//!
//! Error codes:
//! - TDB_SCHEMA_INVALID (REJECT)
//! - TDB_ROW_ARITY_MISMATCH (REJECT)
//! - TDB_ROW_NOT_FOUND (REJECT)
//! - TDB_QUERY_INVALID (REJECT)
//! - TDB_UNKNOWN_FIELD (REJECT)
//! - TDB_UNKNOWN_SORT_FIELD (REJECT)
//!
//! Every table error leaves the table exactly as it was before the call.

use std::fmt;

use crate::index::RecordId;
use crate::planner::{PlannerError, PlannerErrorCode};
use crate::schema::{SchemaError, SchemaErrorCode};

/// Severity levels for table errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation rejected, table unchanged and usable
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Table-level error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableErrorCode {
    /// Schema unset, invalid, or changed after rows exist
    TdbSchemaInvalid,
    /// Row length differs from schema arity
    TdbRowArityMismatch,
    /// Record id outside `0..row_count`
    TdbRowNotFound,
    /// Empty criteria, or a criterion with neither bound
    TdbQueryInvalid,
    /// Criterion names a field the schema lacks
    TdbUnknownField,
    /// Sort criterion names a field the schema lacks
    TdbUnknownSortField,
}

impl TableErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            TableErrorCode::TdbSchemaInvalid => "TDB_SCHEMA_INVALID",
            TableErrorCode::TdbRowArityMismatch => "TDB_ROW_ARITY_MISMATCH",
            TableErrorCode::TdbRowNotFound => "TDB_ROW_NOT_FOUND",
            TableErrorCode::TdbQueryInvalid => "TDB_QUERY_INVALID",
            TableErrorCode::TdbUnknownField => "TDB_UNKNOWN_FIELD",
            TableErrorCode::TdbUnknownSortField => "TDB_UNKNOWN_SORT_FIELD",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for TableErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Table error with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableError {
    code: TableErrorCode,
    message: String,
}

impl TableError {
    /// No schema has been specified yet
    pub fn schema_unset() -> Self {
        Self {
            code: TableErrorCode::TdbSchemaInvalid,
            message: "No schema specified".to_string(),
        }
    }

    /// Schema cannot be replaced once rows are stored
    pub fn schema_locked(row_count: usize) -> Self {
        Self {
            code: TableErrorCode::TdbSchemaInvalid,
            message: format!("Schema is fixed once rows exist ({} stored)", row_count),
        }
    }

    /// Row length does not match the schema
    pub fn arity_mismatch(expected: usize, actual: usize) -> Self {
        Self {
            code: TableErrorCode::TdbRowArityMismatch,
            message: format!("Row has {} fields, schema expects {}", actual, expected),
        }
    }

    /// Record id is out of range
    pub fn row_not_found(id: RecordId, row_count: usize) -> Self {
        Self {
            code: TableErrorCode::TdbRowNotFound,
            message: format!("Record {} not found ({} rows stored)", id, row_count),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> TableErrorCode {
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
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for TableError {}

impl From<SchemaError> for TableError {
    fn from(err: SchemaError) -> Self {
        let code = match err.code() {
            SchemaErrorCode::TdbSchemaInvalid => TableErrorCode::TdbSchemaInvalid,
        };
        Self {
            code,
            message: err.message().to_string(),
        }
    }
}

impl From<PlannerError> for TableError {
    fn from(err: PlannerError) -> Self {
        let code = match err.code() {
            PlannerErrorCode::TdbQueryInvalid => TableErrorCode::TdbQueryInvalid,
            PlannerErrorCode::TdbUnknownField => TableErrorCode::TdbUnknownField,
            PlannerErrorCode::TdbUnknownSortField => TableErrorCode::TdbUnknownSortField,
        };
        Self {
            code,
            message: err.message().to_string(),
        }
    }
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;
