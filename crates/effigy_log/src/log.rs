//! Append-only invocation log.

use crate::record::CallRecord;
use effigy_core::{OperationDescriptor, Value};
use std::sync::RwLock;

/// The append-only, insertion-ordered log of intercepted calls.
///
/// Appends are linearizable: a single write lock serializes them, so the
/// stored order is consistent with some valid interleaving of the concurrent
/// calls that produced it. Reads take snapshots and are safe to iterate
/// while more calls are being recorded elsewhere.
#[derive(Debug, Default)]
pub struct InvocationLog {
    records: RwLock<Vec<CallRecord>>,
}

impl InvocationLog {
    /// Create a new empty log
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Record one invocation. Always succeeds; the argument values are
    /// stored as an owned deep copy.
    pub fn record(&self, operation: OperationDescriptor, arguments: Vec<Value>) -> CallRecord {
        let record = CallRecord::new(operation, arguments);
        let mut records = self.records.write().unwrap();
        records.push(record.clone());
        record
    }

    /// Snapshot of all records in call order
    #[must_use]
    pub fn all(&self) -> Vec<CallRecord> {
        let records = self.records.read().unwrap();
        records.clone()
    }

    /// Snapshot of the records for one operation name, preserving order.
    /// Filters by name only, not by signature.
    #[must_use]
    pub fn for_operation(&self, name: &str) -> Vec<CallRecord> {
        let records = self.records.read().unwrap();
        records
            .iter()
            .filter(|record| record.operation_name() == name)
            .cloned()
            .collect()
    }

    /// Number of recorded calls for one operation name
    #[must_use]
    pub fn count_for(&self, name: &str) -> usize {
        let records = self.records.read().unwrap();
        records
            .iter()
            .filter(|record| record.operation_name() == name)
            .count()
    }

    /// Total number of recorded calls
    #[must_use]
    pub fn len(&self) -> usize {
        let records = self.records.read().unwrap();
        records.len()
    }

    /// Check if nothing has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
