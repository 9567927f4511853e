//! Hook Table - observer fan-out for runtime events
//!
//! The registry and the facade fire events through a [`HookTable`] instead
//! of calling the usage optimizer (or any other observer) directly. The
//! composition step in [`super::bootstrap`] installs observers once; the hot
//! path only loads the current list.
//!
//! ```text
//! TypeRegistry::register ─┐
//! WeaveContainer::resolve ─┼─► HookTable ─► [UsageOptimizer, user observers...]
//! UsageOptimizer::toggle ──┘
//! ```

use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::debug;
use weave_domain::ports::RuntimeObserver;
use weave_domain::value_objects::TypeKey;

type ObserverList = Vec<Arc<dyn RuntimeObserver>>;

/// Lock-free list of installed runtime observers
///
/// Firing a hook loads the current list without locking or allocating.
/// Installing swaps in a new list, so a hook that is already running keeps
/// the list it started with.
pub struct HookTable {
    observers: ArcSwap<ObserverList>,
}

impl HookTable {
    /// Create an empty hook table
    pub fn new() -> Self {
        Self {
            observers: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Install an observer; it receives every event fired afterwards
    pub fn install(&self, observer: Arc<dyn RuntimeObserver>) {
        debug!(observer = observer.name(), "Installing runtime observer");
        self.observers.rcu(|current| {
            let mut next = ObserverList::clone(current);
            next.push(Arc::clone(&observer));
            next
        });
    }

    /// Remove every observer named `name`; returns whether any was removed
    pub fn uninstall(&self, name: &str) -> bool {
        let before = self.len();
        self.observers.rcu(|current| {
            current
                .iter()
                .filter(|o| o.name() != name)
                .cloned()
                .collect::<ObserverList>()
        });
        self.len() != before
    }

    /// Remove every observer
    pub fn clear(&self) {
        self.observers.store(Arc::new(Vec::new()));
    }

    /// Number of installed observers
    pub fn len(&self) -> usize {
        self.observers.load().len()
    }

    /// Whether no observer is installed
    pub fn is_empty(&self) -> bool {
        self.observers.load().is_empty()
    }

    /// Fire `on_register`
    pub fn on_register(&self, key: &TypeKey) {
        for observer in self.observers.load().iter() {
            observer.on_register(key);
        }
    }

    /// Fire `on_resolve`
    pub fn on_resolve(&self, key: &TypeKey) {
        for observer in self.observers.load().iter() {
            observer.on_resolve(key);
        }
    }

    /// Fire `on_nil_resolution`
    pub fn on_nil_resolution(&self, key: &TypeKey) {
        for observer in self.observers.load().iter() {
            observer.on_nil_resolution(key);
        }
    }

    /// Fire `on_optimization_toggle`
    pub fn on_optimization_toggle(&self, enabled: bool) {
        for observer in self.observers.load().iter() {
            observer.on_optimization_toggle(enabled);
        }
    }
}

impl Default for HookTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HookTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self
            .observers
            .load()
            .iter()
            .map(|o| o.name().to_string())
            .collect();
        f.debug_struct("HookTable").field("observers", &names).finish()
    }
}
