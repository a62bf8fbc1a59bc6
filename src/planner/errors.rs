//! Planner error types
//!
//! Error codes:
//! - TDB_QUERY_INVALID (REJECT)
//! - TDB_UNKNOWN_FIELD (REJECT)
//! - TDB_UNKNOWN_SORT_FIELD (REJECT)

use std::fmt;

/// Severity levels for planner errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Query rejected, table unchanged
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Planner-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerErrorCode {
    /// Empty criteria, or a criterion with neither bound
    TdbQueryInvalid,
    /// Criterion names a field the schema lacks
    TdbUnknownField,
    /// Sort criterion names a field the schema lacks (reject policy only)
    TdbUnknownSortField,
}

impl PlannerErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            PlannerErrorCode::TdbQueryInvalid => "TDB_QUERY_INVALID",
            PlannerErrorCode::TdbUnknownField => "TDB_UNKNOWN_FIELD",
            PlannerErrorCode::TdbUnknownSortField => "TDB_UNKNOWN_SORT_FIELD",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for PlannerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Planner error with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerError {
    code: PlannerErrorCode,
    message: String,
    field: Option<String>,
}

impl PlannerError {
    /// No criteria supplied
    pub fn empty_criteria() -> Self {
        Self {
            code: PlannerErrorCode::TdbQueryInvalid,
            message: "Query requires at least one search criterion".to_string(),
            field: None,
        }
    }

    /// Criterion has neither a lower nor an upper bound
    pub fn missing_bounds(position: usize, field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            code: PlannerErrorCode::TdbQueryInvalid,
            message: format!(
                "Criterion {} on '{}' has neither a minimum nor a maximum value",
                position, field
            ),
            field: Some(field),
        }
    }

    /// Criterion field not in schema
    pub fn unknown_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            code: PlannerErrorCode::TdbUnknownField,
            message: format!("Unknown search field '{}'", field),
            field: Some(field),
        }
    }

    /// Sort field not in schema
    pub fn unknown_sort_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            code: PlannerErrorCode::TdbUnknownSortField,
            message: format!("Unknown sort field '{}'", field),
            field: Some(field),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> PlannerErrorCode {
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

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for PlannerError {}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
