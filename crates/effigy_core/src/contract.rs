//! Capability contract descriptions.
//!
//! A contract enumerates the operations a substitute must stand in for:
//! name, ordered parameter kinds, and a declared return kind. Only
//! capability-shaped contracts (pure operation sets with no implementation)
//! can be substituted.

use crate::value::ValueKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Return kind declared by an operation.
///
/// The engine derives unconfigured defaults solely from this kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnKind {
    /// The operation returns nothing
    Void,
    /// The operation returns a truth value
    Truth,
    /// The operation returns a signed integer
    Int,
    /// The operation returns a floating-point number
    Float,
    /// The operation returns a single character
    Char,
    /// The operation returns a reference/object kind
    Reference,
}

impl ReturnKind {
    /// Get a string representation of the return kind
    #[must_use]
    pub const fn kind_name(self) -> &'static str {
        match self {
            Self::Void => "Void",
            Self::Truth => "Truth",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Char => "Char",
            Self::Reference => "Reference",
        }
    }
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind_name())
    }
}

/// Shape of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractShape {
    /// A pure operation set with no implementation; substitutable
    Capability,
    /// A concrete type carrying behavior of its own; not substitutable
    Concrete,
    /// A sealed type closed to extension; not substitutable
    Sealed,
}

impl ContractShape {
    /// Get a string representation of the shape
    #[must_use]
    pub const fn shape_name(self) -> &'static str {
        match self {
            Self::Capability => "Capability",
            Self::Concrete => "Concrete",
            Self::Sealed => "Sealed",
        }
    }
}

/// One member of a capability contract.
///
/// Immutable; one instance exists per declared operation and is derived
/// once when a substitute is created for the contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationDescriptor {
    /// Operation name
    pub name: String,
    /// Ordered parameter kinds
    pub params: Vec<ValueKind>,
    /// Declared return kind
    pub returns: ReturnKind,
}

impl OperationDescriptor {
    /// Create a new operation descriptor
    #[must_use]
    pub fn new(name: impl Into<String>, params: Vec<ValueKind>, returns: ReturnKind) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
        }
    }

    /// Number of declared parameters
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for OperationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ") -> {}", self.returns)
    }
}

/// A capability contract: a named set of operation signatures with no
/// implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Contract name
    pub name: String,
    /// Shape of the described type
    pub shape: ContractShape,
    /// Declared operations, in declaration order
    pub operations: Vec<OperationDescriptor>,
}

impl Contract {
    /// Create a new contract with the given shape
    #[must_use]
    pub fn new(name: impl Into<String>, shape: ContractShape) -> Self {
        Self {
            name: name.into(),
            shape,
            operations: Vec::new(),
        }
    }

    /// Create a capability contract
    #[must_use]
    pub fn capability(name: impl Into<String>) -> Self {
        Self::new(name, ContractShape::Capability)
    }

    /// Create a concrete (non-substitutable) contract description
    #[must_use]
    pub fn concrete(name: impl Into<String>) -> Self {
        Self::new(name, ContractShape::Concrete)
    }

    /// Create a sealed (non-substitutable) contract description
    #[must_use]
    pub fn sealed(name: impl Into<String>) -> Self {
        Self::new(name, ContractShape::Sealed)
    }

    /// Declare an operation
    #[must_use]
    pub fn with_operation(mut self, operation: OperationDescriptor) -> Self {
        self.operations.push(operation);
        self
    }

    /// Check if this contract can be substituted
    #[must_use]
    pub fn is_capability(&self) -> bool {
        self.shape == ContractShape::Capability
    }

    /// All declared operations with the given name, in declaration order
    #[must_use]
    pub fn operations_named(&self, name: &str) -> Vec<&OperationDescriptor> {
        self.operations
            .iter()
            .filter(|op| op.name == name)
            .collect()
    }

    /// Number of declared operations
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the contract declares no operations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
