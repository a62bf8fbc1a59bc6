//! Table metrics
//!
//! - Counters only, monotonic
//! - Reset only when the table is dropped
//! - Readable through a shared reference

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for one table
#[derive(Debug, Default)]
pub struct TableMetrics {
    /// Rows accepted
    rows_inserted: AtomicU64,
    /// Rows refused (schema unset or arity mismatch)
    rows_rejected: AtomicU64,
    /// Successful searches
    queries_executed: AtomicU64,
    /// Searches refused by validation
    queries_rejected: AtomicU64,
    /// Index entries and rows visited by scans
    entries_scanned: AtomicU64,
}

impl TableMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment rows inserted
    pub fn increment_rows_inserted(&self) {
        self.rows_inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment rows rejected
    pub fn increment_rows_rejected(&self) {
        self.rows_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment queries executed
    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment queries rejected
    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Add scanned entries
    pub fn add_entries_scanned(&self, count: u64) {
        self.entries_scanned.fetch_add(count, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            rows_inserted: self.rows_inserted.load(Ordering::Relaxed),
            rows_rejected: self.rows_rejected.load(Ordering::Relaxed),
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            entries_scanned: self.entries_scanned.load(Ordering::Relaxed),
        }
    }
}

impl Clone for TableMetrics {
    fn clone(&self) -> Self {
        let snapshot = self.snapshot();
        Self {
            rows_inserted: AtomicU64::new(snapshot.rows_inserted),
            rows_rejected: AtomicU64::new(snapshot.rows_rejected),
            queries_executed: AtomicU64::new(snapshot.queries_executed),
            queries_rejected: AtomicU64::new(snapshot.queries_rejected),
            entries_scanned: AtomicU64::new(snapshot.entries_scanned),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub rows_inserted: u64,
    pub rows_rejected: u64,
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub entries_scanned: u64,
}
