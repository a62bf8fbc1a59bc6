//! tabledb - an in-memory tabular store with ordered multi-valued indexes
//!
//! Rows are string tuples appended to a `Table`. Each indexed column keeps
//! an `OrderedMultiMap` from value to the record ids holding it, and range
//! searches intersect per-column scans before an optional stable sort.

pub mod cli;
pub mod config;
pub mod executor;
pub mod index;
pub mod observability;
pub mod planner;
pub mod schema;
pub mod table;

pub use index::RecordId;
pub use planner::{SearchCriterion, SortCriterion, SortDirection, SortFieldPolicy};
pub use schema::{FieldDescriptor, Row, Schema};
pub use table::{Table, TableError, TableErrorCode};
