//! Handle types for emitters and the collections that own them.

use serde::{Deserialize, Serialize};

/// Handle of a particle emitter inside its owning bundle.
///
/// Emitters refer back to their bundle through this value instead of a
/// pointer, so the bundle is free to reallocate its storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmitterId(u32);

impl EmitterId {
    /// Creates a new emitter ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the ID that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for EmitterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "emitter#{}", self.0)
    }
}
