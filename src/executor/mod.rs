//! Query execution
//!
//! Turns a validated `QueryPlan` into a `ResultSet`: per-criterion scans,
//! intersection, then an optional stable multi-key sort.

mod executor;
mod filters;
mod result;
mod sorter;

pub use executor::QueryEngine;
pub use filters::RowFilter;
pub use result::ResultSet;
pub use sorter::MultiKeySorter;
