//! Registry keys for configured stubs.

use effigy_core::{OperationDescriptor, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key for a configured stub: an operation plus the argument signature it
/// was registered against.
///
/// The signature is stored as a deep copy at registration time so later
/// mutation by the configuring caller cannot change the key. An empty
/// signature is the no-args fallback key: it matches the operation
/// regardless of the arguments actually supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StubKey {
    operation: OperationDescriptor,
    signature: Vec<Value>,
}

impl StubKey {
    /// Create a key for `operation` with the given argument signature
    #[must_use]
    pub fn new(operation: OperationDescriptor, signature: Vec<Value>) -> Self {
        Self {
            operation,
            signature,
        }
    }

    /// Create the no-args fallback key for `operation`
    #[must_use]
    pub fn fallback(operation: OperationDescriptor) -> Self {
        Self::new(operation, Vec::new())
    }

    /// The operation this key belongs to
    #[must_use]
    pub fn operation(&self) -> &OperationDescriptor {
        &self.operation
    }

    /// The registered argument signature
    #[must_use]
    pub fn signature(&self) -> &[Value] {
        &self.signature
    }

    /// Check if this is a no-args fallback key
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.signature.is_empty()
    }
}

impl fmt::Display for StubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.operation.name)?;
        for (i, value) in self.signature.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}
