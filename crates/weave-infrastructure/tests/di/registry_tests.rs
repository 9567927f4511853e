//! Type Registry Tests

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use weave_domain::error::Error;
use weave_domain::value_objects::TypeKey;
use weave_infrastructure::di::TypeRegistry;

#[derive(Debug, PartialEq)]
struct Settings {
    port: u16,
}

struct Scratch(usize);

#[test]
fn test_instance_identity() {
    let registry = TypeRegistry::default();
    let original = Arc::new(Settings { port: 8080 });
    registry.register_shared(original.clone());

    for _ in 0..10 {
        let resolved = registry.resolve::<Settings>().unwrap();
        assert!(Arc::ptr_eq(&resolved, &original));
    }
}

#[test]
fn test_factory_runs_once_per_resolve() {
    let registry = TypeRegistry::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    registry.register_factory(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        Scratch(n)
    });

    let values: Vec<usize> = (0..5)
        .map(|_| registry.resolve::<Scratch>().unwrap().0)
        .collect();

    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert_eq!(values, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_release_is_idempotent() {
    let registry = TypeRegistry::default();
    registry.register_instance(Settings { port: 1 });

    assert!(registry.release_type::<Settings>());
    assert!(registry.resolve::<Settings>().is_none());
    assert!(!registry.release_type::<Settings>());
}

#[test]
fn test_missing_type_resolves_to_none() {
    let registry = TypeRegistry::default();
    assert!(registry.resolve::<Settings>().is_none());
    assert!(registry.resolve_any(&TypeKey::of::<Settings>()).is_none());
}

#[test]
fn test_last_write_wins() {
    let registry = TypeRegistry::default();
    registry.register_instance(Settings { port: 1 });
    registry.register_instance(Settings { port: 2 });

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.resolve::<Settings>().unwrap().port, 2);
}

#[test]
fn test_release_handle_is_one_shot() {
    let registry = TypeRegistry::default();
    let handle = registry.register_instance(Settings { port: 1 });

    assert!(handle.release());
    assert!(handle.is_released());
    assert!(!handle.release());
    assert!(!registry.contains(&TypeKey::of::<Settings>()));
}

#[test]
fn test_stale_handle_keeps_newer_entry() {
    let registry = TypeRegistry::default();
    let old = registry.register_instance(Settings { port: 1 });
    let _new = registry.register_instance(Settings { port: 2 });

    assert!(!old.release());
    assert_eq!(registry.resolve::<Settings>().unwrap().port, 2);
}

#[test]
fn test_handle_does_not_keep_registry_alive() {
    let registry = TypeRegistry::default();
    let handle = registry.register_instance(Settings { port: 1 });
    drop(registry);

    assert!(!handle.release());
}

#[test]
fn test_strict_registration_rejects_existing_key() {
    let registry = TypeRegistry::default();
    registry.try_register_instance(Settings { port: 1 }).unwrap();

    let err = registry
        .try_register_instance(Settings { port: 2 })
        .unwrap_err();
    assert!(matches!(err, Error::RegistrationConflict { .. }));
    assert_eq!(registry.resolve::<Settings>().unwrap().port, 1);
}

#[test]
fn test_keys_are_sorted_by_name() {
    let registry = TypeRegistry::default();
    registry.register_instance(Settings { port: 1 });
    registry.register_factory(|| Scratch(0));

    let names: Vec<String> = registry.keys().iter().map(TypeKey::short_name).collect();
    assert_eq!(names, vec!["Scratch", "Settings"]);

    registry.clear();
    assert!(registry.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_resolves_with_background_writes() {
    let registry = TypeRegistry::default();
    let singleton = Arc::new(Settings { port: 443 });
    registry.register_shared(singleton.clone());

    let stop = Arc::new(AtomicBool::new(false));
    let writer = {
        let registry = registry.clone();
        let stop = stop.clone();
        thread::spawn(move || {
            let mut cycles = 0usize;
            while !stop.load(Ordering::Relaxed) {
                let handle = registry.register_instance(Scratch(cycles));
                handle.release();
                cycles += 1;
            }
            cycles
        })
    };

    let mut tasks = Vec::with_capacity(1000);
    for _ in 0..1000 {
        let registry = registry.clone();
        tasks.push(tokio::spawn(async move { registry.resolve::<Settings>() }));
    }

    for task in tasks {
        let resolved = task.await.unwrap().expect("singleton stays registered");
        assert!(Arc::ptr_eq(&resolved, &singleton));
        assert_eq!(resolved.port, 443);
    }

    stop.store(true, Ordering::Relaxed);
    writer.join().expect("writer thread never panics");
}
