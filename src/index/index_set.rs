//! Per-column index collection
//!
//! Holds one `OrderedMultiMap` for every indexed column of a schema.
//! Columns without an index have no map at all.

use crate::schema::{Row, Schema};

use super::multimap::{OrderedMultiMap, RecordId};

/// One ordered index per indexed column
#[derive(Debug, Clone, Default)]
pub struct IndexSet {
    /// Indexed by column position; `None` for non-indexed columns
    indexes: Vec<Option<OrderedMultiMap>>,
}

impl IndexSet {
    /// Creates empty indexes for every indexed column of `schema`
    pub fn new(schema: &Schema) -> Self {
        let indexes = schema
            .fields()
            .iter()
            .map(|field| field.is_indexed().then(OrderedMultiMap::new))
            .collect();
        Self { indexes }
    }

    /// Fans a row out into each indexed column's map.
    ///
    /// The caller has already checked the row against the schema arity.
    pub fn insert_row(&mut self, row: &Row, id: RecordId) {
        for (index, value) in self.indexes.iter_mut().zip(row) {
            if let Some(map) = index {
                map.insert(value.as_str(), id);
            }
        }
    }

    /// Index for column `column`, if that column is indexed
    pub fn index(&self, column: usize) -> Option<&OrderedMultiMap> {
        self.indexes.get(column).and_then(Option::as_ref)
    }

    /// Positions of indexed columns, ascending
    pub fn indexed_columns(&self) -> Vec<usize> {
        self.indexes
            .iter()
            .enumerate()
            .filter(|(_, index)| index.is_some())
            .map(|(column, _)| column)
            .collect()
    }

    /// Empties every index, keeping the column layout
    pub fn clear(&mut self) {
        for map in self.indexes.iter_mut().flatten() {
            map.clear();
        }
    }
}
