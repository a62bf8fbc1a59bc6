//! Query planner subsystem for tabledb
//!
//! Turns search and sort criteria into an immutable, schema-resolved plan.
//!
//! # Design Principles
//!
//! - Deterministic: same inputs give the same plan
//! - Explicit: every criterion needs a bound, every field must exist
//! - Stateless: field resolution lives in the plan, never in the table

mod ast;
mod errors;
mod explain;
mod planner;

pub use ast::{Query, SearchCriterion, SortCriterion, SortDirection, SortFieldPolicy};
pub use errors::{PlannerError, PlannerErrorCode, PlannerResult};
pub use explain::{ExplainPlan, ExplainScan};
pub use planner::{QueryPlan, QueryPlanner, ScanMode, ScanSource, ScanSpec, SortKey};
