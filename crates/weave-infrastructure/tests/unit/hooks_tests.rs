//! Hook Table Tests

use std::sync::Arc;
use std::sync::Mutex;
use weave_domain::ports::RuntimeObserver;
use weave_domain::value_objects::TypeKey;
use weave_infrastructure::di::HookTable;

struct Database;

struct Recorder {
    label: &'static str,
    events: Mutex<Vec<String>>,
}

impl Recorder {
    fn named(label: &'static str) -> Arc<Self> {
        Arc::new(Self {
            label,
            events: Mutex::new(Vec::new()),
        })
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl RuntimeObserver for Recorder {
    fn name(&self) -> &str {
        self.label
    }

    fn on_register(&self, key: &TypeKey) {
        self.events.lock().unwrap().push(format!("register {key}"));
    }

    fn on_nil_resolution(&self, key: &TypeKey) {
        self.events.lock().unwrap().push(format!("nil {key}"));
    }

    fn on_optimization_toggle(&self, enabled: bool) {
        self.events.lock().unwrap().push(format!("toggle {enabled}"));
    }
}

#[test]
fn test_every_observer_receives_events() {
    let hooks = HookTable::new();
    let first = Recorder::named("first");
    let second = Recorder::named("second");
    hooks.install(first.clone());
    hooks.install(second.clone());

    let key = TypeKey::of::<Database>();
    hooks.on_register(&key);
    hooks.on_nil_resolution(&key);
    hooks.on_optimization_toggle(false);

    let expected = vec!["register Database", "nil Database", "toggle false"];
    assert_eq!(first.events(), expected);
    assert_eq!(second.events(), expected);
}

#[test]
fn test_default_methods_ignore_unhandled_events() {
    let hooks = HookTable::new();
    let recorder = Recorder::named("partial");
    hooks.install(recorder.clone());

    hooks.on_resolve(&TypeKey::of::<Database>());
    assert!(recorder.events().is_empty());
}

#[test]
fn test_uninstall_by_name() {
    let hooks = HookTable::new();
    hooks.install(Recorder::named("keep"));
    hooks.install(Recorder::named("drop"));

    assert!(hooks.uninstall("drop"));
    assert!(!hooks.uninstall("drop"));
    assert_eq!(hooks.len(), 1);

    hooks.clear();
    assert!(hooks.is_empty());
}
