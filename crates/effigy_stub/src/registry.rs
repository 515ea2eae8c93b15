//! Concurrent stub registry.

use crate::key::StubKey;
use effigy_core::{OperationDescriptor, SubstituteError, Value};
use indexmap::IndexMap;
use std::sync::RwLock;

/// Error from stub registration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StubError {
    /// The configuration named no operation to stub
    #[error("cannot register a stub without an operation target")]
    MissingOperation,
}

impl From<StubError> for SubstituteError {
    fn from(err: StubError) -> Self {
        Self::InvalidConfiguration {
            reason: err.to_string(),
        }
    }
}

/// Registry of configured stubs for one substitute instance.
///
/// Entries are keyed by (operation, deep-copied argument signature) and are
/// never mutated after insertion; re-registering the identical key
/// overwrites the value (last write wins). Concurrent `register` and
/// `lookup` are each atomic: a race on the same key observes either the old
/// or the new value, never a partial one.
#[derive(Debug, Default)]
pub struct StubRegistry {
    entries: RwLock<IndexMap<StubKey, Value>>,
}

impl StubRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
        }
    }

    /// Store `value` under (operation, signature). An empty `signature`
    /// registers the no-args fallback key for the operation.
    ///
    /// # Errors
    ///
    /// Returns `StubError::MissingOperation` if the operation target is
    /// absent (an unnamed descriptor).
    pub fn register(
        &self,
        operation: &OperationDescriptor,
        signature: Vec<Value>,
        value: Value,
    ) -> Result<(), StubError> {
        if operation.name.is_empty() {
            return Err(StubError::MissingOperation);
        }

        let key = StubKey::new(operation.clone(), signature);
        let mut entries = self.entries.write().unwrap();
        entries.insert(key, value);
        Ok(())
    }

    /// Resolve a call: exact match on (operation, full signature) first,
    /// then the operation's no-args fallback, then `None`.
    #[must_use]
    pub fn lookup(&self, operation: &OperationDescriptor, actual: &[Value]) -> Option<Value> {
        let entries = self.entries.read().unwrap();

        let exact = StubKey::new(operation.clone(), actual.to_vec());
        if let Some(value) = entries.get(&exact) {
            return Some(value.clone());
        }

        let fallback = StubKey::fallback(operation.clone());
        entries.get(&fallback).cloned()
    }

    /// Check if an exact entry exists for (operation, signature)
    #[must_use]
    pub fn contains(&self, operation: &OperationDescriptor, signature: &[Value]) -> bool {
        let entries = self.entries.read().unwrap();
        entries.contains_key(&StubKey::new(operation.clone(), signature.to_vec()))
    }

    /// Number of registered entries
    #[must_use]
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap();
        entries.len()
    }

    /// Check if no stubs are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
