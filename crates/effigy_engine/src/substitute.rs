//! The substitute handle.
//!
//! A `Substitute` is the engine-produced stand-in for one capability
//! contract. It owns exactly one invocation log and one stub registry;
//! clones of the handle share the same instance. Identity is reference
//! identity: two handles are equal iff they point at the same instance.

use crate::defaults::default_for;
use crate::dispatch::DispatchTable;
use crate::reserved::ReservedOp;
use effigy_core::{Contract, SubstituteId, SubstituteResult, Value};
use effigy_log::InvocationLog;
use effigy_stub::StubRegistry;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Debug)]
struct SubstituteInner {
    id: SubstituteId,
    contract: Contract,
    table: DispatchTable,
    log: InvocationLog,
    stubs: StubRegistry,
}

/// An opaque handle implementing a capability contract.
///
/// Created by [`SubstituteEngine::create_substitute`]; alive until every
/// clone of the handle is dropped. No external resources are held, so there
/// is no teardown surface.
///
/// [`SubstituteEngine::create_substitute`]: crate::engine::SubstituteEngine::create_substitute
#[derive(Debug, Clone)]
pub struct Substitute {
    inner: Arc<SubstituteInner>,
}

impl Substitute {
    pub(crate) fn new(contract: Contract) -> Self {
        let table = DispatchTable::build(&contract);
        Self {
            inner: Arc::new(SubstituteInner {
                id: SubstituteId::new(),
                contract,
                table,
                log: InvocationLog::new(),
                stubs: StubRegistry::new(),
            }),
        }
    }

    /// The instance id
    #[must_use]
    pub fn id(&self) -> SubstituteId {
        self.inner.id
    }

    /// The contract this substitute stands in for
    #[must_use]
    pub fn contract(&self) -> &Contract {
        &self.inner.contract
    }

    /// Opaque diagnostic label. Never business equality.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("substitute@{:016x}", self.inner.id.identity_hash())
    }

    /// Stable per-instance identity value
    #[must_use]
    pub fn identity_hash(&self) -> u64 {
        self.inner.id.identity_hash()
    }

    /// Invoke an operation on the substituted contract.
    ///
    /// Reserved identity operations (`eq`, `identity`, `describe`) are
    /// answered directly and never recorded. Contract operations go through
    /// record-then-resolve: the call is appended to the invocation log, the
    /// stub registry is consulted with (operation, arguments), and a miss
    /// falls back to the declared return kind's default. `None` arguments
    /// are normalized to an empty sequence.
    ///
    /// # Errors
    ///
    /// `OperationNotFound` or `AmbiguousOperation` when the name and
    /// arguments do not pick a unique declared operation; nothing is
    /// recorded on a failed resolution.
    pub fn invoke(
        &self,
        operation: &str,
        arguments: Option<Vec<Value>>,
    ) -> SubstituteResult<Value> {
        let arguments = arguments.unwrap_or_default();

        if let Some(reserved) = ReservedOp::from_name(operation) {
            return Ok(self.answer_reserved(reserved, &arguments));
        }

        let descriptor = self.inner.table.resolve_call(operation, &arguments)?.clone();
        tracing::trace!("{} intercepted {}", self.describe(), descriptor);

        self.inner.log.record(descriptor.clone(), arguments.clone());

        if let Some(value) = self.inner.stubs.lookup(&descriptor, &arguments) {
            return Ok(value);
        }
        Ok(default_for(descriptor.returns))
    }

    /// Answer an identity-surface operation without recording it.
    ///
    /// Equality compares the caller-supplied identity token against this
    /// instance's own label, which is reference identity expressed at the
    /// value level.
    fn answer_reserved(&self, reserved: ReservedOp, arguments: &[Value]) -> Value {
        match reserved {
            ReservedOp::Equality => {
                let token = Value::text(self.describe());
                Value::Bool(arguments.first() == Some(&token))
            }
            ReservedOp::Identity => {
                let hash = self.inner.id.identity_hash();
                Value::Int(i64::from_le_bytes(hash.to_le_bytes()))
            }
            ReservedOp::Description => Value::text(self.describe()),
        }
    }

    pub(crate) fn table(&self) -> &DispatchTable {
        &self.inner.table
    }

    pub(crate) fn log(&self) -> &InvocationLog {
        &self.inner.log
    }

    pub(crate) fn stubs(&self) -> &StubRegistry {
        &self.inner.stubs
    }
}

impl PartialEq for Substitute {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Substitute {}

impl Hash for Substitute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Display for Substitute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use effigy_core::{OperationDescriptor, ReturnKind, ValueKind};

    fn repository_contract() -> Contract {
        Contract::capability("UserRepository")
            .with_operation(OperationDescriptor::new(
                "find_by_email",
                vec![ValueKind::Text],
                ReturnKind::Reference,
            ))
            .with_operation(OperationDescriptor::new(
                "save",
                vec![ValueKind::Record],
                ReturnKind::Void,
            ))
            .with_operation(OperationDescriptor::new(
                "exists",
                vec![ValueKind::Text],
                ReturnKind::Truth,
            ))
            .with_operation(OperationDescriptor::new("count", vec![], ReturnKind::Int))
    }

    fn substitute() -> Substitute {
        Substitute::new(repository_contract())
    }

    #[test]
    fn test_unconfigured_defaults_by_return_kind() {
        let sub = substitute();
        let found = sub
            .invoke("find_by_email", Some(vec![Value::text("a@example.com")]))
            .unwrap();
        assert_eq!(found, Value::Absent);

        let exists = sub
            .invoke("exists", Some(vec![Value::text("u1")]))
            .unwrap();
        assert_eq!(exists, Value::Bool(false));

        let count = sub.invoke("count", None).unwrap();
        assert_eq!(count, Value::Int(0));

        let saved = sub
            .invoke("save", Some(vec![Value::record(vec![])]))
            .unwrap();
        assert_eq!(saved, Value::Unit);
    }

    #[test]
    fn test_none_arguments_normalized_to_empty() {
        let sub = substitute();
        sub.invoke("count", None).unwrap();
        let records = sub.log().all();
        assert_eq!(records.len(), 1);
        assert!(records[0].arguments().is_empty());
    }

    #[test]
    fn test_every_call_is_recorded_in_order() {
        let sub = substitute();
        sub.invoke("find_by_email", Some(vec![Value::text("a@example.com")]))
            .unwrap();
        sub.invoke("save", Some(vec![Value::record(vec![])]))
            .unwrap();

        let records = sub.log().all();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].operation_name(), "find_by_email");
        assert_eq!(records[0].arguments(), &[Value::text("a@example.com")]);
        assert_eq!(records[1].operation_name(), "save");
    }

    #[test]
    fn test_unknown_operation_records_nothing() {
        let sub = substitute();
        let result = sub.invoke("drop_table", None);
        assert!(result.is_err());
        assert!(sub.log().is_empty());
    }

    #[test]
    fn test_wrong_arity_records_nothing() {
        let sub = substitute();
        let result = sub.invoke("count", Some(vec![Value::Int(1)]));
        assert!(matches!(
            result,
            Err(effigy_core::SubstituteError::OperationNotFound { .. })
        ));
        assert!(sub.log().is_empty());
    }

    #[test]
    fn test_reserved_operations_never_recorded() {
        let sub = substitute();
        sub.invoke("describe", None).unwrap();
        sub.invoke("identity", None).unwrap();
        sub.invoke("eq", Some(vec![Value::text("whatever")])).unwrap();
        assert!(sub.log().is_empty());
    }

    #[test]
    fn test_describe_is_opaque_and_stable() {
        let sub = substitute();
        let label = sub.invoke("describe", None).unwrap();
        assert_eq!(label, Value::text(sub.describe()));
        assert_eq!(sub.describe(), sub.describe());
    }

    #[test]
    fn test_identity_is_stable_per_instance() {
        let sub = substitute();
        let first = sub.invoke("identity", None).unwrap();
        let second = sub.invoke("identity", None).unwrap();
        assert_eq!(first, second);
        assert_eq!(sub.identity_hash(), sub.clone().identity_hash());

        let other = substitute();
        let theirs = other.invoke("identity", None).unwrap();
        assert_ne!(first, theirs);
    }

    #[test]
    fn test_value_level_equality_is_reference_identity() {
        let sub = substitute();
        let own_token = Value::text(sub.describe());
        assert_eq!(
            sub.invoke("eq", Some(vec![own_token])).unwrap(),
            Value::Bool(true)
        );

        let other = substitute();
        let their_token = Value::text(other.describe());
        assert_eq!(
            sub.invoke("eq", Some(vec![their_token])).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(sub.invoke("eq", None).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_handle_equality_is_reference_identity() {
        let sub = substitute();
        let alias = sub.clone();
        assert_eq!(sub, alias);

        let other = substitute();
        assert_ne!(sub, other);
    }

    #[test]
    fn test_clones_share_the_instance() {
        let sub = substitute();
        let alias = sub.clone();
        alias
            .invoke("find_by_email", Some(vec![Value::text("a@example.com")]))
            .unwrap();
        assert_eq!(sub.log().len(), 1);
    }

    #[test]
    fn test_display_matches_describe() {
        let sub = substitute();
        assert_eq!(sub.to_string(), sub.describe());
        assert!(sub.to_string().starts_with("substitute@"));
    }

    #[test]
    fn test_concurrent_invocations_on_shared_instance() {
        let sub = substitute();
        let mut handles = Vec::new();

        for worker in 0..4 {
            let sub = sub.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    sub.invoke(
                        "find_by_email",
                        Some(vec![Value::text(format!("{}_{}@example.com", worker, i))]),
                    )
                    .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(sub.log().len(), 200);
        assert_eq!(sub.log().count_for("find_by_email"), 200);
    }
}
