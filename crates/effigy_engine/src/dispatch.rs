//! Per-contract dispatch table.
//!
//! Built once when a substitute is created, mapping each declared operation
//! name to its descriptors. Resolution is strict: zero matches and ambiguity
//! are both hard errors, never best-effort guessing.

use effigy_core::{Contract, OperationDescriptor, SubstituteError, SubstituteResult, Value};
use indexmap::IndexMap;

/// Dispatch table for one substituted contract.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    operations: IndexMap<String, Vec<OperationDescriptor>>,
}

impl DispatchTable {
    /// Build the table from a contract's declared operations
    #[must_use]
    pub fn build(contract: &Contract) -> Self {
        let mut operations: IndexMap<String, Vec<OperationDescriptor>> = IndexMap::new();
        for operation in &contract.operations {
            operations
                .entry(operation.name.clone())
                .or_default()
                .push(operation.clone());
        }
        Self { operations }
    }

    /// Resolve an intercepted call by name, arity, and parameter-kind
    /// compatibility with the actual arguments.
    ///
    /// # Errors
    ///
    /// `OperationNotFound` if nothing matches, `AmbiguousOperation` if more
    /// than one declared operation accepts the call.
    pub fn resolve_call(
        &self,
        name: &str,
        actual: &[Value],
    ) -> SubstituteResult<&OperationDescriptor> {
        let candidates: Vec<&OperationDescriptor> = self
            .operations
            .get(name)
            .map(|declared| {
                declared
                    .iter()
                    .filter(|op| op.arity() == actual.len())
                    .filter(|op| {
                        op.params
                            .iter()
                            .zip(actual)
                            .all(|(kind, value)| value.conforms_to(*kind))
                    })
                    .collect()
            })
            .unwrap_or_default();

        match candidates.as_slice() {
            [] => Err(SubstituteError::OperationNotFound {
                name: name.to_string(),
            }),
            [operation] => Ok(*operation),
            _ => Err(SubstituteError::AmbiguousOperation {
                name: name.to_string(),
                matches: candidates.len(),
            }),
        }
    }

    /// Resolve a configuration target by name, optionally constrained by
    /// argument count.
    ///
    /// # Errors
    ///
    /// `OperationNotFound` if nothing matches, `AmbiguousOperation` if the
    /// name (and arity, when given) does not pick a unique operation.
    pub fn resolve_named(
        &self,
        name: &str,
        arity: Option<usize>,
    ) -> SubstituteResult<&OperationDescriptor> {
        let candidates: Vec<&OperationDescriptor> = self
            .operations
            .get(name)
            .map(|declared| {
                declared
                    .iter()
                    .filter(|op| arity.is_none_or(|n| op.arity() == n))
                    .collect()
            })
            .unwrap_or_default();

        match candidates.as_slice() {
            [] => Err(SubstituteError::OperationNotFound {
                name: name.to_string(),
            }),
            [operation] => Ok(*operation),
            _ => Err(SubstituteError::AmbiguousOperation {
                name: name.to_string(),
                matches: candidates.len(),
            }),
        }
    }

    /// Check if an operation name is declared
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Number of distinct declared operation names
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use effigy_core::{ReturnKind, ValueKind};

    fn contract() -> Contract {
        Contract::capability("Finder")
            .with_operation(OperationDescriptor::new(
                "find",
                vec![ValueKind::Text],
                ReturnKind::Reference,
            ))
            .with_operation(OperationDescriptor::new(
                "find",
                vec![ValueKind::Text, ValueKind::Bool],
                ReturnKind::Reference,
            ))
            .with_operation(OperationDescriptor::new("count", vec![], ReturnKind::Int))
    }

    #[test]
    fn test_build_groups_by_name() {
        let table = DispatchTable::build(&contract());
        assert_eq!(table.len(), 2);
        assert!(table.contains("find"));
        assert!(table.contains("count"));
        assert!(!table.contains("save"));
    }

    #[test]
    fn test_resolve_call_by_arity() {
        let table = DispatchTable::build(&contract());

        let one = table.resolve_call("find", &[Value::text("a")]).unwrap();
        assert_eq!(one.arity(), 1);

        let two = table
            .resolve_call("find", &[Value::text("a"), Value::Bool(true)])
            .unwrap();
        assert_eq!(two.arity(), 2);
    }

    #[test]
    fn test_resolve_call_checks_kinds() {
        let table = DispatchTable::build(&contract());
        let result = table.resolve_call("find", &[Value::Int(3)]);
        assert_eq!(
            result,
            Err(SubstituteError::OperationNotFound {
                name: "find".to_string()
            })
        );
    }

    #[test]
    fn test_resolve_call_accepts_absence_for_reference_params() {
        let table = DispatchTable::build(&contract());
        let op = table.resolve_call("find", &[Value::Absent]).unwrap();
        assert_eq!(op.arity(), 1);
    }

    #[test]
    fn test_resolve_call_unknown_operation() {
        let table = DispatchTable::build(&contract());
        let result = table.resolve_call("save", &[]);
        assert_eq!(
            result,
            Err(SubstituteError::OperationNotFound {
                name: "save".to_string()
            })
        );
    }

    #[test]
    fn test_resolve_named_without_arity_is_ambiguous_for_overloads() {
        let table = DispatchTable::build(&contract());
        let result = table.resolve_named("find", None);
        assert_eq!(
            result,
            Err(SubstituteError::AmbiguousOperation {
                name: "find".to_string(),
                matches: 2
            })
        );
    }

    #[test]
    fn test_resolve_named_with_arity_disambiguates() {
        let table = DispatchTable::build(&contract());
        let op = table.resolve_named("find", Some(2)).unwrap();
        assert_eq!(op.arity(), 2);

        let op = table.resolve_named("count", None).unwrap();
        assert_eq!(op.returns, ReturnKind::Int);
    }

    #[test]
    fn test_resolve_named_wrong_arity() {
        let table = DispatchTable::build(&contract());
        let result = table.resolve_named("find", Some(3));
        assert_eq!(
            result,
            Err(SubstituteError::OperationNotFound {
                name: "find".to_string()
            })
        );
    }

    #[test]
    fn test_same_arity_overloads_are_ambiguous_calls() {
        let contract = Contract::capability("Overloaded")
            .with_operation(OperationDescriptor::new(
                "lookup",
                vec![ValueKind::Text],
                ReturnKind::Reference,
            ))
            .with_operation(OperationDescriptor::new(
                "lookup",
                vec![ValueKind::Record],
                ReturnKind::Reference,
            ));
        let table = DispatchTable::build(&contract);

        // The absence marker conforms to both reference kinds
        let result = table.resolve_call("lookup", &[Value::Absent]);
        assert_eq!(
            result,
            Err(SubstituteError::AmbiguousOperation {
                name: "lookup".to_string(),
                matches: 2
            })
        );

        // A concrete argument kind picks one
        let op = table.resolve_call("lookup", &[Value::text("a")]).unwrap();
        assert_eq!(op.params, vec![ValueKind::Text]);
    }

    #[test]
    fn test_empty_contract() {
        let table = DispatchTable::build(&Contract::capability("Empty"));
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }
}
