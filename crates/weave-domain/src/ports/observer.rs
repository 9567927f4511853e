//! Runtime Observer Port
//!
//! Observers are installed into the hook table by a composition step and
//! invoked by the registry and the facade. Neither side depends on the
//! other's concrete type.

use crate::value_objects::TypeKey;

/// Hook contract for cross-cutting runtime observers
///
/// Every method has an empty default so an observer implements only the
/// events it cares about. Hooks run on the caller's thread, after any
/// internal lock has been released, and must not block.
///
/// | Method | Fired when |
/// |--------|------------|
/// | `on_register` | An entry is stored for a type |
/// | `on_resolve` | A resolution produced a value |
/// | `on_nil_resolution` | A resolution found nothing |
/// | `on_optimization_toggle` | Usage optimisation is switched on or off |
pub trait RuntimeObserver: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str {
        "observer"
    }

    /// An entry was stored for `key`
    fn on_register(&self, _key: &TypeKey) {}

    /// A resolution of `key` produced a value
    fn on_resolve(&self, _key: &TypeKey) {}

    /// A resolution of `key` found nothing
    fn on_nil_resolution(&self, _key: &TypeKey) {}

    /// Usage optimisation was enabled or disabled
    fn on_optimization_toggle(&self, _enabled: bool) {}
}
