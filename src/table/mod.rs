//! Table subsystem
//!
//! The public face of the store: schema, append-only rows, per-column
//! indexes and range search, plus delimited text loading.

mod errors;
mod loader;
mod table;

pub use errors::{Severity, TableError, TableErrorCode, TableResult};
pub use loader::{DelimitedLoader, LoadError, LoadOptions, LoadSummary};
pub use table::Table;
