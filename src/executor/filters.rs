//! Row-scan matching for criteria on non-indexed columns
//!
//! Applies the same bound semantics as an index walk, one stored row at a
//! time, so an unindexed criterion intersects exactly like an indexed one.

use crate::index::RecordId;
use crate::planner::ScanSpec;
use crate::schema::Row;

/// Evaluates a scan specification directly against rows
pub struct RowFilter;

impl RowFilter {
    /// Returns ids of all rows whose value in `spec.column` satisfies the
    /// bounds, ascending, plus the number of rows visited.
    pub fn matching_ids(rows: &[Row], spec: &ScanSpec) -> (Vec<RecordId>, usize) {
        let ids = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.get(spec.column).is_some_and(|value| spec.accepts(value)))
            .map(|(id, _)| id)
            .collect();
        (ids, rows.len())
    }
}
