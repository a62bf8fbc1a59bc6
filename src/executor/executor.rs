//! Query engine
//!
//! Executes a `QueryPlan` against one table's indexes and rows.
//!
//! Execution flow (strict order):
//! 1. Collect matching ids for each scan (index walk or row scan)
//! 2. Intersect, stopping as soon as the running set is empty
//! 3. Sort by resolved keys, or keep ascending id order when there are none

use std::collections::BTreeSet;

use crate::index::{Direction, IndexSet, OrderedMultiMap, RangeIterator, RecordId};
use crate::planner::{QueryPlan, ScanMode, ScanSource, ScanSpec};
use crate::schema::Row;

use super::filters::RowFilter;
use super::result::ResultSet;
use super::sorter::MultiKeySorter;

/// Runs plans over borrowed table state
pub struct QueryEngine<'a> {
    indexes: &'a IndexSet,
    rows: &'a [Row],
}

impl<'a> QueryEngine<'a> {
    /// Creates an engine over a table's indexes and rows
    pub fn new(indexes: &'a IndexSet, rows: &'a [Row]) -> Self {
        Self { indexes, rows }
    }

    /// Executes a plan.
    ///
    /// Never fails: the plan was validated against the same schema the
    /// indexes were built from.
    pub fn execute(&self, plan: &QueryPlan) -> ResultSet {
        let mut scanned_entries = 0;
        let mut matched: Option<BTreeSet<RecordId>> = None;

        for spec in &plan.scans {
            let (ids, scanned) = self.scan(spec);
            scanned_entries += scanned;

            let next = match matched {
                None => ids,
                Some(current) => current.intersection(&ids).copied().collect(),
            };
            let exhausted = next.is_empty();
            matched = Some(next);
            if exhausted {
                break;
            }
        }

        let mut record_ids: Vec<RecordId> = matched.unwrap_or_default().into_iter().collect();
        let sorted = !plan.sort_keys.is_empty() && !record_ids.is_empty();
        if sorted {
            MultiKeySorter::new(self.rows, &plan.sort_keys).sort(&mut record_ids);
        }

        ResultSet {
            record_ids,
            scanned_entries,
            sorted,
            skipped_sort_fields: plan.skipped_sort_fields.clone(),
        }
    }

    /// Matching ids for one scan plus the number of entries visited
    fn scan(&self, spec: &ScanSpec) -> (BTreeSet<RecordId>, usize) {
        let index = match spec.source {
            ScanSource::Index => self.indexes.index(spec.column),
            ScanSource::RowScan => None,
        };

        match index {
            Some(index) => Self::walk_index(index, &spec.mode),
            None => {
                let (ids, visited) = RowFilter::matching_ids(self.rows, spec);
                (ids.into_iter().collect(), visited)
            }
        }
    }

    fn walk_index(index: &OrderedMultiMap, mode: &ScanMode) -> (BTreeSet<RecordId>, usize) {
        match mode {
            ScanMode::Ascending { min, max } => {
                let cursor = index.find_equal_or_successor(min);
                Self::collect_while(cursor, |key| max.as_deref().map_or(true, |max| key <= max))
            }
            // No lower bound: walk down to the smallest key.
            ScanMode::Descending { max } => {
                Self::collect_while(index.find_equal_or_predecessor(max), |_| true)
            }
        }
    }

    /// Collects values until `keep` rejects a key. The rejected entry still
    /// counts as visited.
    fn collect_while<D: Direction>(
        cursor: RangeIterator<'_, D>,
        keep: impl Fn(&str) -> bool,
    ) -> (BTreeSet<RecordId>, usize) {
        let mut ids = BTreeSet::new();
        let mut visited = 0;
        for (key, id) in cursor.entries() {
            visited += 1;
            if !keep(key) {
                break;
            }
            ids.insert(id);
        }
        (ids, visited)
    }
}
