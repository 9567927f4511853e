//! Type Registry - concurrent map from type key to factory or instance
//!
//! ## Concurrency
//!
//! Reads share a `parking_lot::RwLock`; registrations and releases take it
//! exclusively, so no reader ever observes a half-written entry. A factory
//! is cloned out under the read lock and invoked **after** the guard is
//! dropped: factories may resolve other types (or register new ones) without
//! deadlocking against the write lock.
//!
//! ## Overrides
//!
//! Registering a key that already has an entry replaces it (last write
//! wins). The `try_register_*` variants refuse instead and return
//! `RegistrationConflict`.

use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};
use weave_domain::error::{Error, Result};
use weave_domain::value_objects::TypeKey;

use super::handles::ReleaseHandle;
use super::hooks::HookTable;

/// Type-erased shared value
pub type AnyValue = Arc<dyn Any + Send + Sync>;

/// Type-erased zero-argument constructor
pub type FactoryFn = Arc<dyn Fn() -> AnyValue + Send + Sync>;

/// What the registry holds for one type
#[derive(Clone)]
pub enum RegistryEntry {
    /// Invoked once per resolution
    Factory(FactoryFn),
    /// Returned verbatim on every resolution
    Instance(AnyValue),
}

impl RegistryEntry {
    /// Produce a value from this entry
    fn produce(self) -> AnyValue {
        match self {
            Self::Factory(factory) => factory(),
            Self::Instance(value) => value,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Factory(_) => "factory",
            Self::Instance(_) => "instance",
        }
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}

struct Slot {
    entry: RegistryEntry,
    generation: u64,
}

pub(crate) struct RegistryInner {
    entries: RwLock<HashMap<TypeKey, Slot>>,
    next_generation: AtomicU64,
    hooks: Arc<HookTable>,
}

impl RegistryInner {
    /// Remove `key` only if its slot still carries `generation`
    pub(crate) fn remove_generation(&self, key: &TypeKey, generation: u64) -> bool {
        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(slot) if slot.generation == generation => {
                entries.remove(key);
                drop(entries);
                debug!(type_name = %key, "Released registry entry");
                true
            }
            Some(_) => {
                drop(entries);
                debug!(type_name = %key, "Stale release handle ignored, entry was replaced");
                false
            }
            None => false,
        }
    }
}

/// Concurrent type registry
///
/// Cloning is cheap and every clone shares the same map.
///
/// ## Example
///
/// ```
/// use weave_infrastructure::di::TypeRegistry;
///
/// struct Config { port: u16 }
///
/// let registry = TypeRegistry::default();
/// registry.register_instance(Config { port: 8080 });
/// assert_eq!(registry.resolve::<Config>().map(|c| c.port), Some(8080));
/// ```
#[derive(Clone)]
pub struct TypeRegistry {
    inner: Arc<RegistryInner>,
}

impl TypeRegistry {
    /// Create a registry that reports registrations to `hooks`
    pub fn new(hooks: Arc<HookTable>) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                entries: RwLock::new(HashMap::new()),
                next_generation: AtomicU64::new(1),
                hooks,
            }),
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Store `entry` for `key`, replacing any previous entry
    pub fn register_entry(&self, key: TypeKey, entry: RegistryEntry) -> ReleaseHandle {
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);
        let kind = entry.kind();
        let replaced = {
            let mut entries = self.inner.entries.write();
            entries.insert(key, Slot { entry, generation }).is_some()
        };
        if replaced {
            debug!(type_name = %key, kind, "Replaced registry entry");
        } else {
            debug!(type_name = %key, kind, "Registered registry entry");
        }
        self.inner.hooks.on_register(&key);
        ReleaseHandle::new(key, generation, Arc::downgrade(&self.inner))
    }

    /// Store `entry` for `key` unless an entry already exists
    pub fn try_register_entry(&self, key: TypeKey, entry: RegistryEntry) -> Result<ReleaseHandle> {
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);
        {
            let mut entries = self.inner.entries.write();
            if entries.contains_key(&key) {
                drop(entries);
                warn!(type_name = %key, "Registration rejected, type already registered");
                return Err(Error::conflict(key.name()));
            }
            entries.insert(key, Slot { entry, generation });
        }
        debug!(type_name = %key, "Registered registry entry");
        self.inner.hooks.on_register(&key);
        Ok(ReleaseHandle::new(key, generation, Arc::downgrade(&self.inner)))
    }

    /// Register a factory invoked on every resolution of `T`
    pub fn register_factory<T, F>(&self, factory: F) -> ReleaseHandle
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.register_entry(TypeKey::of::<T>(), factory_entry(factory))
    }

    /// Register a pre-built instance returned on every resolution of `T`
    pub fn register_instance<T>(&self, value: T) -> ReleaseHandle
    where
        T: Any + Send + Sync,
    {
        self.register_shared(Arc::new(value))
    }

    /// Register an already shared instance of `T`
    pub fn register_shared<T>(&self, value: Arc<T>) -> ReleaseHandle
    where
        T: Any + Send + Sync,
    {
        self.register_entry(TypeKey::of::<T>(), RegistryEntry::Instance(value))
    }

    /// Strict variant of [`Self::register_factory`]
    pub fn try_register_factory<T, F>(&self, factory: F) -> Result<ReleaseHandle>
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.try_register_entry(TypeKey::of::<T>(), factory_entry(factory))
    }

    /// Strict variant of [`Self::register_instance`]
    pub fn try_register_instance<T>(&self, value: T) -> Result<ReleaseHandle>
    where
        T: Any + Send + Sync,
    {
        self.try_register_entry(TypeKey::of::<T>(), RegistryEntry::Instance(Arc::new(value)))
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve the type-erased value stored for `key`
    ///
    /// Returns `None` when nothing is registered. The read guard is released
    /// before a factory runs.
    pub fn resolve_any(&self, key: &TypeKey) -> Option<AnyValue> {
        let entry = self.inner.entries.read().get(key).map(|slot| slot.entry.clone())?;
        Some(entry.produce())
    }

    /// Resolve `T`
    pub fn resolve<T>(&self) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let key = TypeKey::of::<T>();
        let value = self.resolve_any(&key)?;
        match value.downcast::<T>() {
            Ok(typed) => Some(typed),
            Err(_) => {
                warn!(type_name = %key, "Registry entry produced a value of another type");
                None
            }
        }
    }

    // ========================================================================
    // Release and inspection
    // ========================================================================

    /// Remove the entry for `key`; returns whether one was removed
    pub fn release(&self, key: &TypeKey) -> bool {
        let removed = self.inner.entries.write().remove(key).is_some();
        if removed {
            debug!(type_name = %key, "Released registry entry");
        }
        removed
    }

    /// Remove the entry for `T`
    pub fn release_type<T: Any>(&self) -> bool {
        self.release(&TypeKey::of::<T>())
    }

    /// Whether an entry exists for `key`
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.inner.entries.read().contains_key(key)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.inner.entries.read().is_empty()
    }

    /// Registered keys, sorted by type name
    pub fn keys(&self) -> Vec<TypeKey> {
        let mut keys: Vec<TypeKey> = self.inner.entries.read().keys().copied().collect();
        keys.sort();
        keys
    }

    /// Remove every entry; outstanding release handles become no-ops
    pub fn clear(&self) {
        self.inner.entries.write().clear();
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new(Arc::new(HookTable::new()))
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("entries", &self.len())
            .finish()
    }
}

pub(crate) fn factory_entry<T, F>(factory: F) -> RegistryEntry
where
    T: Any + Send + Sync,
    F: Fn() -> T + Send + Sync + 'static,
{
    RegistryEntry::Factory(Arc::new(move || Arc::new(factory()) as AnyValue))
}
