//! EFFIGY Invocation Log
//!
//! Immutable call records and the append-only, insertion-ordered log that
//! holds them. The log is the substitute's memory of "what was called, with
//! what, in what order"; records are never removed or reordered.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod log;
pub mod record;

pub use log::InvocationLog;
pub use record::CallRecord;
