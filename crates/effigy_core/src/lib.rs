//! EFFIGY Core Types
//!
//! This crate contains pure types and logic with no I/O.
//! Values, contract descriptions, identifiers, and the error taxonomy
//! shared by the interception engine.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod error;
pub mod id;
pub mod value;

// Re-exports
pub use contract::{Contract, ContractShape, OperationDescriptor, ReturnKind};
pub use error::{SubstituteError, SubstituteResult};
pub use id::SubstituteId;
pub use value::{Value, ValueKind};
