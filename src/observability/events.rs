//! Observable events for tabledb
//!
//! Events are explicit and typed; the logger only ever sees their stable
//! string names.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded
    ConfigLoaded,

    // Schema
    /// Schema accepted by a table
    SchemaSpecified,
    /// Schema refused
    SchemaRejected,

    // Rows
    /// Row insertion refused
    RowRejected,

    // Delimited loading
    /// Delimited load started
    LoadStart,
    /// Delimited load finished
    LoadComplete,

    // Query
    /// Query executed successfully
    QueryComplete,
    /// Query failed validation
    QueryRejected,
    /// Unknown sort field ignored
    SortFieldSkipped,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaSpecified => "SCHEMA_SPECIFIED",
            Event::SchemaRejected => "SCHEMA_REJECTED",
            Event::RowRejected => "ROW_REJECTED",
            Event::LoadStart => "LOAD_START",
            Event::LoadComplete => "LOAD_COMPLETE",
            Event::QueryComplete => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::SortFieldSkipped => "SORT_FIELD_SKIPPED",
        }
    }

    /// Returns true if this event reports a refused operation
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Event::SchemaRejected | Event::RowRejected | Event::QueryRejected
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL: [Event; 9] = [
        Event::ConfigLoaded,
        Event::SchemaSpecified,
        Event::SchemaRejected,
        Event::RowRejected,
        Event::LoadStart,
        Event::LoadComplete,
        Event::QueryComplete,
        Event::QueryRejected,
        Event::SortFieldSkipped,
    ];

    #[test]
    fn test_event_names_unique() {
        let names: HashSet<&str> = ALL.iter().map(Event::as_str).collect();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn test_rejections() {
        assert!(Event::RowRejected.is_rejection());
        assert!(!Event::QueryComplete.is_rejection());
        assert!(!Event::SortFieldSkipped.is_rejection());
    }
}
