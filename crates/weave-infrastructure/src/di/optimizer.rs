//! Usage Optimizer - passive per-type counters
//!
//! Installed into the [`HookTable`] as a [`RuntimeObserver`]; the registry
//! and the facade never see its concrete type. Counting is a per-key
//! increment with no eviction. Counters only drive classification queries.

use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, info};
use weave_domain::ports::RuntimeObserver;
use weave_domain::value_objects::{TypeKey, UsageStat};

use super::hooks::HookTable;
use crate::config::OptimizerConfig;

/// Per-type registration and resolution counters
#[derive(Debug)]
pub struct UsageOptimizer {
    stats: DashMap<TypeKey, UsageStat>,
    enabled: AtomicBool,
    config: OptimizerConfig,
    /// Where toggles are announced; weak because the table owns us
    hooks: Weak<HookTable>,
}

impl UsageOptimizer {
    /// Create an optimizer that announces toggles through `hooks`
    pub fn new(config: OptimizerConfig, hooks: Weak<HookTable>) -> Self {
        Self {
            stats: DashMap::new(),
            enabled: AtomicBool::new(config.enabled),
            config,
            hooks,
        }
    }

    /// Create one and install it into `hooks`
    pub fn install(config: OptimizerConfig, hooks: &Arc<HookTable>) -> Arc<Self> {
        let optimizer = Arc::new(Self::new(config, Arc::downgrade(hooks)));
        hooks.install(optimizer.clone());
        optimizer
    }

    /// Whether counting is on
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Switch counting on or off and fire `on_optimization_toggle`
    ///
    /// Existing counters are kept. Setting the current value again fires
    /// nothing.
    pub fn set_enabled(&self, enabled: bool) {
        if self.enabled.swap(enabled, Ordering::AcqRel) == enabled {
            return;
        }
        info!(enabled, "Usage optimization toggled");
        if let Some(hooks) = self.hooks.upgrade() {
            hooks.on_optimization_toggle(enabled);
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Counters for `key`
    pub fn stat(&self, key: &TypeKey) -> Option<UsageStat> {
        self.stats.get(key).map(|s| s.clone())
    }

    /// Every counter, most resolved first, ties by type name
    pub fn snapshot(&self) -> Vec<UsageStat> {
        let mut all: Vec<UsageStat> = self.stats.iter().map(|s| s.clone()).collect();
        all.sort_by(|a, b| {
            b.resolutions
                .cmp(&a.resolutions)
                .then_with(|| a.key.cmp(&b.key))
        });
        all
    }

    /// Types resolved at least `threshold` times
    pub fn frequently_used(&self, threshold: u64) -> Vec<TypeKey> {
        self.snapshot()
            .into_iter()
            .filter(|s| s.is_frequent(threshold))
            .map(|s| s.key)
            .collect()
    }

    /// [`Self::frequently_used`] with the configured threshold
    pub fn frequently_used_default(&self) -> Vec<TypeKey> {
        self.frequently_used(self.config.frequent_threshold)
    }

    /// The `n` most resolved types that were resolved at all
    pub fn top_used(&self, n: usize) -> Vec<UsageStat> {
        self.snapshot()
            .into_iter()
            .filter(|s| s.resolutions > 0)
            .take(n)
            .collect()
    }

    /// [`Self::top_used`] with the configured length
    pub fn top_used_default(&self) -> Vec<UsageStat> {
        self.top_used(self.config.top_n)
    }

    /// Types registered but never resolved, sorted by name
    pub fn unused(&self) -> Vec<TypeKey> {
        let mut keys: Vec<TypeKey> = self
            .stats
            .iter()
            .filter(|s| s.is_unused())
            .map(|s| s.key)
            .collect();
        keys.sort();
        keys
    }

    /// Types with at least one empty resolution, sorted by name
    pub fn nil_resolutions(&self) -> Vec<(TypeKey, u64)> {
        let mut misses: Vec<(TypeKey, u64)> = self
            .stats
            .iter()
            .filter(|s| s.nil_resolutions > 0)
            .map(|s| (s.key, s.nil_resolutions))
            .collect();
        misses.sort();
        misses
    }

    /// Drop every counter
    pub fn reset(&self) {
        self.stats.clear();
        debug!("Usage counters reset");
    }

    fn bump(&self, key: &TypeKey, apply: impl FnOnce(&mut UsageStat)) {
        if !self.is_enabled() {
            return;
        }
        let mut stat = self
            .stats
            .entry(*key)
            .or_insert_with(|| UsageStat::new(*key));
        apply(&mut stat);
    }
}

impl RuntimeObserver for UsageOptimizer {
    fn name(&self) -> &str {
        "usage-optimizer"
    }

    fn on_register(&self, key: &TypeKey) {
        self.bump(key, |s| s.registrations += 1);
    }

    fn on_resolve(&self, key: &TypeKey) {
        self.bump(key, |s| s.resolutions += 1);
    }

    fn on_nil_resolution(&self, key: &TypeKey) {
        self.bump(key, |s| s.nil_resolutions += 1);
    }
}
