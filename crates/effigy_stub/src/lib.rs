//! EFFIGY Stub Registry
//!
//! Concurrent mapping from (operation, argument-signature) to a configured
//! return value. Resolution is exact-or-catch-all: an exact structural match
//! on the full signature wins, an empty registered signature matches the
//! operation regardless of arguments, and anything else is a miss.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod key;
pub mod registry;

pub use key::StubKey;
pub use registry::{StubError, StubRegistry};
