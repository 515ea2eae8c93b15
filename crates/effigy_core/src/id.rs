//! Unique identifiers for substitute instances.
//!
//! Substitute identity is reference identity: every created instance gets a
//! fresh id, and the id drives the identity surface (equality, identity
//! hash, and the opaque diagnostic label).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Substitute identifier - identifies one substitute instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubstituteId(Uuid);

impl SubstituteId {
    /// Create a new random SubstituteId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from UUID bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Get as bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Stable per-instance identity value, constant for the lifetime of the
    /// substitute this id belongs to
    #[must_use]
    pub fn identity_hash(&self) -> u64 {
        let bytes = self.0.as_bytes();
        u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ])
    }
}

impl Default for SubstituteId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubstituteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub_{}", self.0)
    }
}
