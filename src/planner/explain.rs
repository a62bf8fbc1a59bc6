//! Explain output
//!
//! Deterministic, JSON-shaped description of a plan or of a rejection.

use serde::Serialize;

use super::errors::PlannerError;
use super::planner::{QueryPlan, ScanMode};

/// One explained scan
#[derive(Debug, Clone, Serialize)]
pub struct ExplainScan {
    pub field: String,
    pub column: usize,
    pub source: &'static str,
    pub mode: &'static str,
    pub min: Option<String>,
    pub max: Option<String>,
}

/// Explain plan output
#[derive(Debug, Clone, Serialize)]
pub struct ExplainPlan {
    /// Whether planning succeeded
    pub accepted: bool,
    /// Scans in evaluation order
    pub scans: Vec<ExplainScan>,
    /// Sort keys as `column direction`
    pub sort: Vec<String>,
    /// Sort fields that were skipped
    pub skipped_sort_fields: Vec<String>,
    /// Rejection error code (if rejected)
    pub rejection_code: Option<String>,
    /// Rejection reason (if rejected)
    pub rejection_reason: Option<String>,
}

impl ExplainPlan {
    /// Creates an explain plan from a successful query plan
    pub fn from_plan(plan: &QueryPlan) -> Self {
        let scans = plan
            .scans
            .iter()
            .map(|scan| {
                let (min, max) = match &scan.mode {
                    ScanMode::Ascending { min, max } => (Some(min.clone()), max.clone()),
                    ScanMode::Descending { max } => (None, Some(max.clone())),
                };
                ExplainScan {
                    field: scan.field.clone(),
                    column: scan.column,
                    source: scan.source.as_str(),
                    mode: scan.mode.as_str(),
                    min,
                    max,
                }
            })
            .collect();

        let sort = plan
            .sort_keys
            .iter()
            .map(|key| format!("{} {}", key.column, key.direction.as_str()))
            .collect();

        Self {
            accepted: true,
            scans,
            sort,
            skipped_sort_fields: plan.skipped_sort_fields.clone(),
            rejection_code: None,
            rejection_reason: None,
        }
    }

    /// Creates an explain plan from a planning error
    pub fn from_error(err: &PlannerError) -> Self {
        Self {
            accepted: false,
            scans: Vec::new(),
            sort: Vec::new(),
            skipped_sort_fields: Vec::new(),
            rejection_code: Some(err.code().code().to_string()),
            rejection_reason: Some(err.message().to_string()),
        }
    }

    /// Renders as a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{QueryPlanner, SearchCriterion, SortCriterion, SortFieldPolicy};
    use crate::schema::{FieldDescriptor, Schema};

    fn schema() -> Schema {
        Schema::new(vec![FieldDescriptor::indexed("Age"), FieldDescriptor::plain("Name")]).unwrap()
    }

    #[test]
    fn test_explain_accepted_plan() {
        let schema = schema();
        let plan = QueryPlanner::new(&schema, SortFieldPolicy::Ignore)
            .plan(
                &[
                    SearchCriterion::at_most("Age", "35"),
                    SearchCriterion::range("Name", "A", "M"),
                ],
                &[SortCriterion::desc("Name")],
            )
            .unwrap();

        let json = ExplainPlan::from_plan(&plan).to_json();
        assert_eq!(json["accepted"], true);
        assert_eq!(json["scans"][0]["mode"], "SEEK_FLOOR_BACKWARD");
        assert_eq!(json["scans"][0]["source"], "INDEX");
        assert_eq!(json["scans"][0]["min"], serde_json::Value::Null);
        assert_eq!(json["scans"][1]["source"], "ROW_SCAN");
        assert_eq!(json["sort"][0], "1 desc");
    }

    #[test]
    fn test_explain_rejection() {
        let explain = ExplainPlan::from_error(&PlannerError::empty_criteria());
        assert!(!explain.accepted);
        assert_eq!(explain.rejection_code.as_deref(), Some("TDB_QUERY_INVALID"));
    }
}
