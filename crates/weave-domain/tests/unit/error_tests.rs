//! Unit tests for domain error types

use weave_domain::{CyclePath, Error, TypeKey};

struct Service;

#[test]
fn test_not_found_error() {
    let error = Error::not_found("Service");
    match error {
        Error::DependencyNotFound { type_name } => assert_eq!(type_name, "Service"),
        _ => panic!("Expected DependencyNotFound error"),
    }
}

#[test]
fn test_circular_error_display_carries_path() {
    let key = TypeKey::of::<Service>();
    let error = Error::circular(CyclePath::closing(vec![key]));
    assert_eq!(
        error.to_string(),
        "Circular dependency detected: Service -> Service"
    );
    assert!(error.is_circular_dependency());
}

#[test]
fn test_build_failure_exposes_inner_cycle() {
    let key = TypeKey::of::<Service>();
    let inner = Error::circular(CyclePath::closing(vec![key]));
    let error = Error::build_failure(2, inner);

    let path = error.cycle_path().expect("wrapped cycle");
    assert_eq!(path.len(), 2);
    assert!(error.to_string().contains("batch 2"));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_bridge_timeout_error() {
    let error = Error::bridge_timeout("graph snapshot", 250);
    assert!(error.is_timeout());
    match error {
        Error::BridgeTimeout {
            operation,
            timeout_ms,
        } => {
            assert_eq!(operation, "graph snapshot");
            assert_eq!(timeout_ms, 250);
        }
        _ => panic!("Expected BridgeTimeout error"),
    }
}

#[test]
fn test_configuration_error_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error = Error::configuration_with_source("Failed to read weave.toml", io);
    assert!(error.to_string().contains("weave.toml"));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json_error.into();
    assert!(matches!(error, Error::Json { .. }));
}

#[test]
fn test_module_error() {
    let error = Error::module("database migration failed");
    assert_eq!(error.to_string(), "Module error: database migration failed");
    assert!(!error.is_circular_dependency());
}
