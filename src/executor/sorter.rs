//! Multi-key result sorting
//!
//! Stable recursive merge sort over record ids, keyed indirectly through
//! the owning table's rows. Independent of index structure.
//!
//! The comparator cascades: sort key `k + 1` is consulted only when rows
//! tie on key `k`. Rows tied on every key keep their input order because the
//! merge always takes from the left run on a tie.

use std::cmp::Ordering;

use crate::index::RecordId;
use crate::planner::{SortDirection, SortKey};
use crate::schema::Row;

/// Sorts record ids by resolved sort keys
pub struct MultiKeySorter<'a> {
    rows: &'a [Row],
    keys: &'a [SortKey],
}

impl<'a> MultiKeySorter<'a> {
    pub fn new(rows: &'a [Row], keys: &'a [SortKey]) -> Self {
        Self { rows, keys }
    }

    /// Cascading comparison of two records.
    ///
    /// Values compare byte-wise; `Descending` keys reverse the order.
    pub fn compare(&self, a: RecordId, b: RecordId) -> Ordering {
        for key in self.keys {
            let ordering = self.value(a, key.column).cmp(self.value(b, key.column));
            let ordering = match key.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Sorts `ids` in place. O(n log n) moves, O(keys) per comparison.
    pub fn sort(&self, ids: &mut [RecordId]) {
        if ids.len() <= 1 || self.keys.is_empty() {
            return;
        }
        let mut scratch = vec![0; ids.len()];
        self.merge_sort(ids, &mut scratch);
    }

    fn merge_sort(&self, ids: &mut [RecordId], scratch: &mut [RecordId]) {
        let len = ids.len();
        if len <= 1 {
            return;
        }

        let mid = len / 2;
        {
            let (left, right) = ids.split_at_mut(mid);
            let (left_scratch, right_scratch) = scratch.split_at_mut(mid);
            self.merge_sort(left, left_scratch);
            self.merge_sort(right, right_scratch);
        }

        self.merge(ids, mid, scratch);
    }

    /// Merges the sorted runs `ids[..mid]` and `ids[mid..]`.
    fn merge(&self, ids: &mut [RecordId], mid: usize, scratch: &mut [RecordId]) {
        let (left, right) = ids.split_at(mid);
        let (mut i, mut j, mut k) = (0, 0, 0);

        while i < left.len() && j < right.len() {
            // Ties go left: this is what keeps the sort stable.
            if self.compare(left[i], right[j]) != Ordering::Greater {
                scratch[k] = left[i];
                i += 1;
            } else {
                scratch[k] = right[j];
                j += 1;
            }
            k += 1;
        }

        // One run is exhausted; the rest of the other is already in order.
        for &id in &left[i..] {
            scratch[k] = id;
            k += 1;
        }
        for &id in &right[j..] {
            scratch[k] = id;
            k += 1;
        }

        ids.copy_from_slice(&scratch[..k]);
    }

    fn value(&self, id: RecordId, column: usize) -> &'a str {
        self.rows
            .get(id)
            .and_then(|row| row.get(column))
            .map_or("", String::as_str)
    }
}
