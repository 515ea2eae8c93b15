//! Immutable capture of one intercepted call.

use effigy_core::{OperationDescriptor, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable value capturing one invocation: which operation, with which
/// arguments, at the moment it occurred.
///
/// Arguments are deep-copied at capture time, so later mutation by the
/// caller cannot corrupt history. Equality is deep and structural: two
/// records are equal iff they name the same operation and their argument
/// sequences are element-wise deeply equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    operation: OperationDescriptor,
    arguments: Vec<Value>,
}

impl CallRecord {
    /// Capture a call against `operation` with `arguments`
    #[must_use]
    pub fn new(operation: OperationDescriptor, arguments: Vec<Value>) -> Self {
        Self {
            operation,
            arguments,
        }
    }

    /// The operation that was invoked
    #[must_use]
    pub fn operation(&self) -> &OperationDescriptor {
        &self.operation
    }

    /// Name of the invoked operation
    #[must_use]
    pub fn operation_name(&self) -> &str {
        &self.operation.name
    }

    /// The captured argument values, in call order
    #[must_use]
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }
}

impl fmt::Display for CallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operation.name)?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", argument)?;
        }
        write!(f, ")")
    }
}
