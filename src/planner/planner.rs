//! Query planner
//!
//! Validates criteria against a schema and resolves every field name to a
//! column once. The resulting plan is immutable and owns all of its
//! resolution state, so nothing carries over from one search to the next.
//!
//! Validation order (strict):
//! 1. Criteria list must be non-empty
//! 2. Per criterion, in order: at least one bound, then a known field
//! 3. Sort criteria resolved under the configured `SortFieldPolicy`

use crate::observability::{log_event_with_fields, Event};
use crate::schema::Schema;

use super::ast::{SearchCriterion, SortCriterion, SortDirection, SortFieldPolicy};
use super::errors::{PlannerError, PlannerResult};
use super::explain::ExplainPlan;

/// How one criterion walks its column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanMode {
    /// Seek the ceiling of `min`, walk forward, stop past `max`
    Ascending { min: String, max: Option<String> },
    /// Seek the floor of `max`, walk backward to the first key.
    ///
    /// There is no lower bound, so this may visit the whole index.
    Descending { max: String },
}

impl ScanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Ascending { .. } => "SEEK_CEILING_FORWARD",
            ScanMode::Descending { .. } => "SEEK_FLOOR_BACKWARD",
        }
    }
}

/// Where matches for a criterion come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanSource {
    /// The column's ordered index
    Index,
    /// A filter over stored rows (column not indexed)
    RowScan,
}

impl ScanSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanSource::Index => "INDEX",
            ScanSource::RowScan => "ROW_SCAN",
        }
    }
}

/// A resolved criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSpec {
    /// Field name as written in the query
    pub field: String,
    /// Resolved column position
    pub column: usize,
    /// Walk mode
    pub mode: ScanMode,
    /// Match source
    pub source: ScanSource,
}

impl ScanSpec {
    /// Returns true if `value` satisfies this criterion's bounds
    pub fn accepts(&self, value: &str) -> bool {
        match &self.mode {
            ScanMode::Ascending { min, max } => {
                value >= min.as_str() && max.as_deref().map_or(true, |max| value <= max)
            }
            ScanMode::Descending { max } => value <= max.as_str(),
        }
    }
}

/// A resolved sort criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    /// Resolved column position
    pub column: usize,
    /// Direction
    pub direction: SortDirection,
}

/// Immutable query plan
#[derive(Debug, Clone)]
pub struct QueryPlan {
    /// One scan per criterion, in criterion order
    pub scans: Vec<ScanSpec>,
    /// Sort keys in priority order
    pub sort_keys: Vec<SortKey>,
    /// Sort field names skipped under `SortFieldPolicy::Ignore`
    pub skipped_sort_fields: Vec<String>,
}

impl QueryPlan {
    /// JSON description of the plan
    pub fn explain(&self) -> serde_json::Value {
        ExplainPlan::from_plan(self).to_json()
    }
}

/// Plans queries against one schema
pub struct QueryPlanner<'a> {
    schema: &'a Schema,
    sort_field_policy: SortFieldPolicy,
}

impl<'a> QueryPlanner<'a> {
    /// Creates a planner
    pub fn new(schema: &'a Schema, sort_field_policy: SortFieldPolicy) -> Self {
        Self {
            schema,
            sort_field_policy,
        }
    }

    /// Validates the query and resolves it into a plan.
    ///
    /// Deterministic: same schema and inputs give the same plan.
    pub fn plan(
        &self,
        criteria: &[SearchCriterion],
        sort: &[SortCriterion],
    ) -> PlannerResult<QueryPlan> {
        if criteria.is_empty() {
            return Err(PlannerError::empty_criteria());
        }

        let scans = criteria
            .iter()
            .enumerate()
            .map(|(position, criterion)| self.resolve_criterion(position, criterion))
            .collect::<PlannerResult<Vec<_>>>()?;

        let mut sort_keys = Vec::with_capacity(sort.len());
        let mut skipped_sort_fields = Vec::new();
        for criterion in sort {
            match self.schema.position(&criterion.field_name) {
                Some(column) => sort_keys.push(SortKey {
                    column,
                    direction: criterion.direction,
                }),
                None => match self.sort_field_policy {
                    SortFieldPolicy::Reject => {
                        return Err(PlannerError::unknown_sort_field(&criterion.field_name))
                    }
                    SortFieldPolicy::Ignore => {
                        log_event_with_fields(
                            Event::SortFieldSkipped,
                            &[("field", criterion.field_name.as_str())],
                        );
                        skipped_sort_fields.push(criterion.field_name.clone());
                    }
                },
            }
        }

        Ok(QueryPlan {
            scans,
            sort_keys,
            skipped_sort_fields,
        })
    }

    fn resolve_criterion(
        &self,
        position: usize,
        criterion: &SearchCriterion,
    ) -> PlannerResult<ScanSpec> {
        let mode = match (&criterion.min_value, &criterion.max_value) {
            (Some(min), max) => ScanMode::Ascending {
                min: min.clone(),
                max: max.clone(),
            },
            (None, Some(max)) => ScanMode::Descending { max: max.clone() },
            (None, None) => {
                return Err(PlannerError::missing_bounds(position, &criterion.field_name))
            }
        };

        let column = self
            .schema
            .position(&criterion.field_name)
            .ok_or_else(|| PlannerError::unknown_field(&criterion.field_name))?;

        let source = if self.schema.is_indexed(column) {
            ScanSource::Index
        } else {
            ScanSource::RowScan
        };

        Ok(ScanSpec {
            field: criterion.field_name.clone(),
            column,
            mode,
            source,
        })
    }
}
