//! Usage Optimizer Tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use weave_domain::ports::RuntimeObserver;
use weave_domain::value_objects::TypeKey;
use weave_infrastructure::config::RuntimeConfig;
use weave_infrastructure::di::WeaveContainer;

struct Cache;
struct Mailer;
struct Missing;

#[derive(Default)]
struct ToggleProbe {
    on: AtomicUsize,
    off: AtomicUsize,
}

impl RuntimeObserver for ToggleProbe {
    fn name(&self) -> &str {
        "toggle-probe"
    }

    fn on_optimization_toggle(&self, enabled: bool) {
        if enabled {
            self.on.fetch_add(1, Ordering::SeqCst);
        } else {
            self.off.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[test]
fn test_facade_events_reach_optimizer() {
    let container = WeaveContainer::new();
    container.register_instance(Cache).unwrap();
    container.register_factory(|| Mailer).unwrap();
    for _ in 0..4 {
        container.resolve::<Cache>().unwrap();
    }
    assert!(container.resolve::<Missing>().is_none());
    assert!(container.resolve::<Missing>().is_none());

    let optimizer = container.optimizer();
    let cache = optimizer.stat(&TypeKey::of::<Cache>()).unwrap();
    assert_eq!(cache.registrations, 1);
    assert_eq!(cache.resolutions, 4);

    assert_eq!(optimizer.unused(), vec![TypeKey::of::<Mailer>()]);
    assert_eq!(
        optimizer.nil_resolutions(),
        vec![(TypeKey::of::<Missing>(), 2)]
    );
}

#[test]
fn test_frequency_classification() {
    let mut config = RuntimeConfig::default();
    config.optimizer.frequent_threshold = 3;
    config.optimizer.top_n = 1;
    let container = WeaveContainer::with_config(config).unwrap();
    container.register_instance(Cache).unwrap();
    container.register_instance(Mailer).unwrap();

    for _ in 0..3 {
        container.resolve::<Cache>().unwrap();
    }
    container.resolve::<Mailer>().unwrap();

    let optimizer = container.optimizer();
    assert_eq!(optimizer.frequently_used_default(), vec![TypeKey::of::<Cache>()]);
    assert_eq!(optimizer.frequently_used(1).len(), 2);

    let top = optimizer.top_used_default();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].key, TypeKey::of::<Cache>());

    let snapshot = optimizer.snapshot();
    assert_eq!(snapshot[0].resolutions, 3);
    assert_eq!(snapshot[1].resolutions, 1);
}

#[test]
fn test_toggle_fires_hook_once_per_change() {
    let container = WeaveContainer::new();
    let probe = Arc::new(ToggleProbe::default());
    container.install_observer(probe.clone());

    let optimizer = container.optimizer();
    optimizer.set_enabled(false);
    optimizer.set_enabled(false);
    optimizer.set_enabled(true);

    assert_eq!(probe.off.load(Ordering::SeqCst), 1);
    assert_eq!(probe.on.load(Ordering::SeqCst), 1);
}

#[test]
fn test_disabled_from_config_counts_nothing() {
    let mut config = RuntimeConfig::default();
    config.optimizer.enabled = false;
    let container = WeaveContainer::with_config(config).unwrap();

    container.register_instance(Cache).unwrap();
    container.resolve::<Cache>().unwrap();
    assert!(container.optimizer().snapshot().is_empty());
}

#[test]
fn test_reset_clears_counters() {
    let container = WeaveContainer::new();
    container.register_instance(Cache).unwrap();
    container.resolve::<Cache>().unwrap();

    container.optimizer().reset();
    assert!(container.optimizer().stat(&TypeKey::of::<Cache>()).is_none());
}
