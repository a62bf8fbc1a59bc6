//! Index subsystem for tabledb
//!
//! Per-column ordered indexes, built incrementally as rows arrive.
//!
//! # Design Principles
//!
//! - In-memory only, rebuilt by re-inserting rows
//! - Not self-balancing: worst-case depth is linear in distinct keys
//! - Append-only: no deletion or update of indexed values
//! - Iterator direction is fixed at seek time
//!
//! # Invariants
//!
//! - BST ordering on string keys (byte-wise lexicographic)
//! - Duplicate chains preserve insertion order
//! - An invalid iterator never becomes valid again

mod cursor;
mod index_set;
mod multimap;

pub use cursor::{Ascending, Descending, Direction, Entries, RangeIterator};
pub use index_set::IndexSet;
pub use multimap::{OrderedMultiMap, RecordId};
