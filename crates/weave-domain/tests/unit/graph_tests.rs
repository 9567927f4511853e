//! Unit tests for graph value objects

use std::collections::HashSet;

use weave_domain::{DependencyEdge, ExportFormat, TypeKey};

struct Api;
struct Db;

#[test]
fn test_edges_are_a_set() {
    let api = TypeKey::of::<Api>();
    let db = TypeKey::of::<Db>();
    let mut edges = HashSet::new();
    edges.insert(DependencyEdge::new(api, db, "reads"));
    edges.insert(DependencyEdge::new(api, db, "reads"));
    edges.insert(DependencyEdge::new(api, db, "writes"));
    assert_eq!(edges.len(), 2);
}

#[test]
fn test_export_format_parsing() {
    assert_eq!("dot".parse::<ExportFormat>().unwrap(), ExportFormat::Dot);
    assert_eq!("Mermaid".parse::<ExportFormat>().unwrap(), ExportFormat::Mermaid);
    assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
    assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
    assert!("svg".parse::<ExportFormat>().is_err());
}

#[test]
fn test_export_format_round_trips_through_display() {
    for format in ExportFormat::ALL {
        assert_eq!(format.to_string().parse::<ExportFormat>().unwrap(), format);
    }
}
