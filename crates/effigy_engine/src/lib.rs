//! EFFIGY Substitute Engine
//!
//! Materializes callable substitutes for capability contracts and mediates
//! every call through record-then-resolve: append a call record, consult the
//! stub registry, and answer with the configured value or the declared
//! return kind's default.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod defaults;
pub mod dispatch;
pub mod engine;
pub mod reserved;
pub mod substitute;

pub use defaults::default_for;
pub use dispatch::DispatchTable;
pub use engine::SubstituteEngine;
pub use reserved::ReservedOp;
pub use substitute::Substitute;
