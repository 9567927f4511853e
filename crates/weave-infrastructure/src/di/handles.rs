//! Release Handles - one-shot removal capabilities
//!
//! A [`ReleaseHandle`] is returned by every registration. It captures the
//! key and the generation of the entry it was issued for, plus a weak
//! reference to the registry:
//!
//! ```text
//! register::<Db>() ──► Slot { generation: 7 } ◄── ReleaseHandle { Db, 7, Weak }
//! register::<Db>() ──► Slot { generation: 9 }     (handle 7 is now stale)
//! handle.release()  ──► generation mismatch → no-op
//! ```
//!
//! Dropping a handle does not release anything.

use std::sync::Weak;
use std::sync::atomic::{AtomicBool, Ordering};
use weave_domain::value_objects::TypeKey;

use super::registry::RegistryInner;

/// One-shot capability removing the entry it was issued for
///
/// Releasing twice, releasing after the entry was replaced, or releasing
/// after the registry was dropped are all no-ops.
pub struct ReleaseHandle {
    key: TypeKey,
    generation: u64,
    registry: Weak<RegistryInner>,
    released: AtomicBool,
}

impl ReleaseHandle {
    pub(crate) fn new(key: TypeKey, generation: u64, registry: Weak<RegistryInner>) -> Self {
        Self {
            key,
            generation,
            registry,
            released: AtomicBool::new(false),
        }
    }

    /// Remove the entry; returns whether this call removed it
    pub fn release(&self) -> bool {
        if self.released.swap(true, Ordering::AcqRel) {
            return false;
        }
        match self.registry.upgrade() {
            Some(registry) => registry.remove_generation(&self.key, self.generation),
            None => false,
        }
    }

    /// Type the handle was issued for
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Generation of the entry the handle was issued for
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `release` has already been called
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for ReleaseHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseHandle")
            .field("key", &self.key)
            .field("generation", &self.generation)
            .field("released", &self.is_released())
            .finish()
    }
}
