//! Result types for query execution

use crate::index::RecordId;

/// Matched record ids of one search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    /// Matching ids: sort order when sorted, otherwise ascending id order
    pub record_ids: Vec<RecordId>,
    /// Index entries and rows visited while scanning
    pub scanned_entries: usize,
    /// Whether at least one sort key was applied
    pub sorted: bool,
    /// Sort field names that did not resolve and were skipped
    pub skipped_sort_fields: Vec<String>,
}

impl ResultSet {
    /// Returns true if nothing matched
    pub fn is_empty(&self) -> bool {
        self.record_ids.is_empty()
    }

    /// Match count
    pub fn len(&self) -> usize {
        self.record_ids.len()
    }

    /// Iterates ids in result order
    pub fn iter(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.record_ids.iter().copied()
    }

    /// Consumes the result into its ids
    pub fn into_ids(self) -> Vec<RecordId> {
        self.record_ids
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a RecordId;
    type IntoIter = std::slice::Iter<'a, RecordId>;

    fn into_iter(self) -> Self::IntoIter {
        self.record_ids.iter()
    }
}
