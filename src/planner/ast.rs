//! Query structures
//!
//! A query is a list of range criteria (combined with AND) plus an ordered
//! list of sort criteria. All values are strings compared lexicographically.

use serde::{Deserialize, Serialize};

/// One range criterion on a single field.
///
/// At least one bound must be present. An empty string is treated as an
/// absent bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriterion {
    /// Field name
    pub field_name: String,
    /// Inclusive lower bound
    pub min_value: Option<String>,
    /// Inclusive upper bound
    pub max_value: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl SearchCriterion {
    /// Creates a criterion from optional bounds, dropping empty ones
    pub fn new(
        field_name: impl Into<String>,
        min_value: Option<String>,
        max_value: Option<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            min_value: non_empty(min_value),
            max_value: non_empty(max_value),
        }
    }

    /// `min <= field <= max`
    pub fn range(field_name: impl Into<String>, min: impl Into<String>, max: impl Into<String>) -> Self {
        Self::new(field_name, Some(min.into()), Some(max.into()))
    }

    /// `field >= min`
    pub fn at_least(field_name: impl Into<String>, min: impl Into<String>) -> Self {
        Self::new(field_name, Some(min.into()), None)
    }

    /// `field <= max`
    pub fn at_most(field_name: impl Into<String>, max: impl Into<String>) -> Self {
        Self::new(field_name, None, Some(max.into()))
    }

    /// `field == value`
    pub fn equal(field_name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self::new(field_name, Some(value.clone()), Some(value))
    }

    /// Returns true if at least one bound is present
    pub fn has_bound(&self) -> bool {
        self.min_value.is_some() || self.max_value.is_some()
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smaller values first
    Ascending,
    /// Larger values first
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    /// Parses `asc`/`ascending`/`desc`/`descending` (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

/// One sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortCriterion {
    /// Field to sort by
    pub field_name: String,
    /// Direction
    pub direction: SortDirection,
}

impl SortCriterion {
    pub fn asc(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// What to do with sort criteria naming fields the schema lacks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortFieldPolicy {
    /// Skip the criterion, report it on the plan and log it
    #[default]
    Ignore,
    /// Fail the query with `TDB_UNKNOWN_SORT_FIELD`
    Reject,
}

/// A complete query: criteria and sort keys
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Range criteria, all of which must hold
    pub criteria: Vec<SearchCriterion>,
    /// Sort keys in priority order
    pub sort: Vec<SortCriterion>,
}

impl Query {
    /// Creates an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a criterion
    pub fn with_criterion(mut self, criterion: SearchCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Adds a sort key
    pub fn with_sort(mut self, sort: SortCriterion) -> Self {
        self.sort.push(sort);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds_are_absent() {
        let c = SearchCriterion::new("Age", Some(String::new()), Some(String::new()));
        assert_eq!(c.min_value, None);
        assert_eq!(c.max_value, None);
        assert!(!c.has_bound());
    }

    #[test]
    fn test_constructors() {
        let r = SearchCriterion::range("LastName", "A", "N");
        assert_eq!(r.min_value.as_deref(), Some("A"));
        assert_eq!(r.max_value.as_deref(), Some("N"));

        let m = SearchCriterion::at_most("Age", "35");
        assert_eq!(m.min_value, None);
        assert!(m.has_bound());

        let e = SearchCriterion::equal("Age", "30");
        assert_eq!(e.min_value, e.max_value);
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("ASC"), Some(SortDirection::Ascending));
        assert_eq!(SortDirection::parse("descending"), Some(SortDirection::Descending));
        assert_eq!(SortDirection::parse("up"), None);
    }

    #[test]
    fn test_sort_field_policy_default() {
        assert_eq!(SortFieldPolicy::default(), SortFieldPolicy::Ignore);
        let parsed: SortFieldPolicy = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(parsed, SortFieldPolicy::Reject);
    }

    #[test]
    fn test_query_builder() {
        let query = Query::new()
            .with_criterion(SearchCriterion::at_least("Age", "18"))
            .with_sort(SortCriterion::desc("Age"));
        assert_eq!(query.criteria.len(), 1);
        assert_eq!(query.sort[0].direction, SortDirection::Descending);
    }
}
