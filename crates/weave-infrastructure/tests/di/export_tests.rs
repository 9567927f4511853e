//! Graph Export Tests

use weave_domain::value_objects::ExportFormat;
use weave_infrastructure::di::WeaveContainer;

struct Api;
struct Service;
struct Store;

fn wired() -> WeaveContainer {
    let container = WeaveContainer::new();
    container.depends_on::<Api, Service>("calls");
    container.depends_on::<Service, Store>("reads");
    container.depends_on::<Store, Service>("notifies");
    container
}

#[test]
fn test_dot_export() {
    let dot = wired().export_graph(ExportFormat::Dot).unwrap();
    assert!(dot.starts_with("digraph dependencies {"));
    assert!(dot.contains("n0 [label=\"Api\"];"));
    assert!(dot.contains("n0 -> n1 [label=\"calls\"];"));
    assert!(dot.contains("n1 -> n2 [label=\"reads\", color=red];"));
    assert!(dot.trim_end().ends_with('}'));
}

#[test]
fn test_mermaid_export() {
    let mermaid = wired().export_graph(ExportFormat::Mermaid).unwrap();
    assert!(mermaid.starts_with("graph LR"));
    assert!(mermaid.contains("n1 -->|\"reads\"| n2"));
    assert!(mermaid.contains("%% cycle: Service -> Store -> Service"));
}

#[test]
fn test_text_export() {
    let text = wired().export_graph(ExportFormat::Text).unwrap();
    assert!(text.contains("--- Types (3) ---"));
    assert!(text.contains("Api -> Service [calls]"));
    assert!(text.contains("--- Cycles (1) ---"));
}

#[test]
fn test_json_export_lists_cycles_separately() {
    let json = wired().export_graph(ExportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(value["edges"].as_array().unwrap().len(), 3);
    let cycles = value["cycles"].as_array().unwrap();
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].as_array().unwrap().len(), 3);
}

#[test]
fn test_empty_graph_exports() {
    let container = WeaveContainer::new();
    for format in ExportFormat::ALL {
        assert!(container.export_graph(format).is_ok());
    }
    let text = container.export_graph(ExportFormat::Text).unwrap();
    assert!(text.contains("none"));
}
