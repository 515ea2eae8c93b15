//! The substitute engine facade.

use crate::substitute::Substitute;
use effigy_core::{Contract, SubstituteError, SubstituteId, SubstituteResult, Value};
use effigy_log::CallRecord;
use std::collections::BTreeSet;
use std::sync::RwLock;

/// Factory and mediation surface for substitute instances.
///
/// The engine validates contracts, builds each substitute's dispatch table
/// once at creation, and answers configuration and query calls against the
/// handles it produced. Handles from a different engine are rejected.
#[derive(Debug, Default)]
pub struct SubstituteEngine {
    handles: RwLock<BTreeSet<SubstituteId>>,
}

impl SubstituteEngine {
    /// Create a new engine with no substitutes
    #[must_use]
    pub fn new() -> Self {
        Self {
            handles: RwLock::new(BTreeSet::new()),
        }
    }

    /// Materialize a substitute for a capability contract.
    ///
    /// Each created instance owns a fresh, independent invocation log and
    /// stub registry; instances never share state.
    ///
    /// # Errors
    ///
    /// `InvalidContract` if the contract's shape is not `Capability`; no
    /// instance is produced.
    pub fn create_substitute(&self, contract: Contract) -> SubstituteResult<Substitute> {
        if !contract.is_capability() {
            return Err(SubstituteError::InvalidContract {
                name: contract.name.clone(),
                reason: format!(
                    "shape is {}, not a capability contract",
                    contract.shape.shape_name()
                ),
            });
        }

        let substitute = Substitute::new(contract);
        tracing::debug!(
            "created {} for contract {}",
            substitute.describe(),
            substitute.contract().name
        );

        let mut handles = self.handles.write().unwrap();
        handles.insert(substitute.id());
        Ok(substitute)
    }

    /// Configure a stub: when `operation` is invoked with arguments deeply
    /// equal to `arguments`, return `value`. `None` arguments register the
    /// operation's no-args fallback, matching any actual arguments.
    ///
    /// The operation name is resolved against the contract's declared
    /// operations, constrained by argument count when `arguments` is given.
    ///
    /// # Errors
    ///
    /// `InvalidHandle` for a foreign handle; `OperationNotFound` or
    /// `AmbiguousOperation` when resolution does not pick a unique
    /// operation; `InvalidConfiguration` for malformed input. No partial
    /// registration occurs on error.
    pub fn configure(
        &self,
        handle: &Substitute,
        operation: &str,
        arguments: Option<Vec<Value>>,
        value: Value,
    ) -> SubstituteResult<()> {
        self.check_handle(handle)?;

        let arity = arguments.as_ref().map(Vec::len);
        let descriptor = handle.table().resolve_named(operation, arity)?.clone();
        let signature = arguments.unwrap_or_default();

        handle.stubs().register(&descriptor, signature, value)?;
        tracing::debug!("{} stubbed {}", handle.describe(), descriptor);
        Ok(())
    }

    /// Snapshot of every recorded invocation on `handle`, in call order
    ///
    /// # Errors
    ///
    /// `InvalidHandle` for a handle this engine did not produce
    pub fn invocations(&self, handle: &Substitute) -> SubstituteResult<Vec<CallRecord>> {
        self.check_handle(handle)?;
        Ok(handle.log().all())
    }

    /// Number of recorded invocations of `operation` on `handle`
    ///
    /// # Errors
    ///
    /// `InvalidHandle` for a handle this engine did not produce
    pub fn count_invocations(
        &self,
        handle: &Substitute,
        operation: &str,
    ) -> SubstituteResult<usize> {
        self.check_handle(handle)?;
        Ok(handle.log().count_for(operation))
    }

    /// Check that `operation` was invoked exactly `times` times on `handle`
    ///
    /// # Errors
    ///
    /// `InvalidHandle` for a handle this engine did not produce
    pub fn verify(
        &self,
        handle: &Substitute,
        operation: &str,
        times: usize,
    ) -> SubstituteResult<bool> {
        Ok(self.count_invocations(handle, operation)? == times)
    }

    /// Check if `handle` was produced by this engine
    #[must_use]
    pub fn contains(&self, handle: &Substitute) -> bool {
        let handles = self.handles.read().unwrap();
        handles.contains(&handle.id())
    }

    /// Number of substitutes this engine has produced
    #[must_use]
    pub fn substitute_count(&self) -> usize {
        let handles = self.handles.read().unwrap();
        handles.len()
    }

    fn check_handle(&self, handle: &Substitute) -> SubstituteResult<()> {
        if self.contains(handle) {
            Ok(())
        } else {
            Err(SubstituteError::InvalidHandle {
                handle: handle.describe(),
            })
        }
    }
}
