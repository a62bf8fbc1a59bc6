//! Row store with per-column ordered indexes
//!
//! Rows are append-only. Record ids are positions in insertion order,
//! starting at 0, never reused. Every rejected operation leaves the table
//! unchanged and usable.

use crate::executor::{QueryEngine, ResultSet};
use crate::index::{IndexSet, RecordId};
use crate::observability::{log_event_with_fields, Event, MetricsSnapshot, TableMetrics};
use crate::planner::{Query, QueryPlan, QueryPlanner, SearchCriterion, SortCriterion, SortFieldPolicy};
use crate::schema::{Row, Schema};

use super::errors::{TableError, TableResult};

/// In-memory table
#[derive(Debug, Clone, Default)]
pub struct Table {
    schema: Option<Schema>,
    rows: Vec<Row>,
    indexes: IndexSet,
    metrics: TableMetrics,
    sort_field_policy: SortFieldPolicy,
}

impl Table {
    /// Creates a table with no schema. Inserts fail until one is specified.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with `schema`
    pub fn with_schema(schema: Schema) -> Self {
        let mut table = Self::new();
        table.install_schema(schema);
        table
    }

    /// Sets the schema. Only allowed while the table holds no rows.
    pub fn specify_schema(&mut self, schema: Schema) -> TableResult<()> {
        if !self.rows.is_empty() {
            let err = TableError::schema_locked(self.rows.len());
            log_event_with_fields(Event::SchemaRejected, &[("reason", err.message())]);
            return Err(err);
        }
        self.install_schema(schema);
        Ok(())
    }

    fn install_schema(&mut self, schema: Schema) {
        self.indexes = IndexSet::new(&schema);
        let arity = schema.arity().to_string();
        let indexed = schema.indexed_columns().len().to_string();
        log_event_with_fields(
            Event::SchemaSpecified,
            &[("arity", arity.as_str()), ("indexed", indexed.as_str())],
        );
        self.schema = Some(schema);
    }

    /// Current schema, if specified
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    /// Sets how sort criteria with unknown fields are handled
    pub fn set_sort_field_policy(&mut self, policy: SortFieldPolicy) {
        self.sort_field_policy = policy;
    }

    /// Current sort field policy
    pub fn sort_field_policy(&self) -> SortFieldPolicy {
        self.sort_field_policy
    }

    /// Appends a row and indexes it.
    ///
    /// Fails if no schema is set or the row length differs from the schema
    /// arity. On success returns the row's record id.
    pub fn insert_row(&mut self, row: Row) -> TableResult<RecordId> {
        let schema = match &self.schema {
            Some(schema) => schema,
            None => return Err(self.reject_row(TableError::schema_unset())),
        };
        if row.len() != schema.arity() {
            let err = TableError::arity_mismatch(schema.arity(), row.len());
            return Err(self.reject_row(err));
        }

        let id = self.rows.len();
        self.indexes.insert_row(&row, id);
        self.rows.push(row);
        self.metrics.increment_rows_inserted();
        Ok(id)
    }

    fn reject_row(&self, err: TableError) -> TableError {
        self.metrics.increment_rows_rejected();
        log_event_with_fields(
            Event::RowRejected,
            &[("code", err.code().code()), ("reason", err.message())],
        );
        err
    }

    /// Row stored under `id`
    pub fn get_row(&self, id: RecordId) -> TableResult<&Row> {
        self.rows
            .get(id)
            .ok_or_else(|| TableError::row_not_found(id, self.rows.len()))
    }

    /// Number of stored rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no rows are stored
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stored rows in record id order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Underlying indexes
    pub fn indexes(&self) -> &IndexSet {
        &self.indexes
    }

    /// Validates the query and resolves it against the schema
    pub fn plan(
        &self,
        criteria: &[SearchCriterion],
        sort: &[SortCriterion],
    ) -> TableResult<QueryPlan> {
        let schema = self.schema.as_ref().ok_or_else(TableError::schema_unset)?;
        QueryPlanner::new(schema, self.sort_field_policy)
            .plan(criteria, sort)
            .map_err(TableError::from)
    }

    /// Runs a range search.
    ///
    /// All criteria must hold for a row to match. With sort criteria the ids
    /// come back in sort order, otherwise in ascending record id order.
    pub fn search(
        &self,
        criteria: &[SearchCriterion],
        sort: &[SortCriterion],
    ) -> TableResult<ResultSet> {
        let plan = match self.plan(criteria, sort) {
            Ok(plan) => plan,
            Err(err) => {
                self.metrics.increment_queries_rejected();
                log_event_with_fields(
                    Event::QueryRejected,
                    &[("code", err.code().code()), ("reason", err.message())],
                );
                return Err(err);
            }
        };

        let result = QueryEngine::new(&self.indexes, &self.rows).execute(&plan);

        self.metrics.increment_queries_executed();
        self.metrics.add_entries_scanned(result.scanned_entries as u64);
        let matches = result.len().to_string();
        let scanned = result.scanned_entries.to_string();
        log_event_with_fields(
            Event::QueryComplete,
            &[("matches", matches.as_str()), ("scanned", scanned.as_str())],
        );

        Ok(result)
    }

    /// Runs a search described by a `Query`
    pub fn execute(&self, query: &Query) -> TableResult<ResultSet> {
        self.search(&query.criteria, &query.sort)
    }

    /// Operational counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
