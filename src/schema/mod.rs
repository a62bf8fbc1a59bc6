//! Schema subsystem for tabledb
//!
//! A schema is fixed at table creation and governs row arity and which
//! columns carry an ordered index.
//!
//! # Rules
//!
//! - At least one indexed field
//! - Field names are non-empty and unique
//! - Every value is a string, compared lexicographically

mod errors;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use loader::{SchemaLoader, DEFAULT_DELIMITER, DEFAULT_INDEX_MARKER};
pub use types::{FieldDescriptor, IndexType, Row, Schema};
