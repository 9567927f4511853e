//! Graph export renderers
//!
//! Pure functions from a [`GraphSnapshot`] to text. Nodes are named by the
//! short type name; DOT and Mermaid use generated identifiers (`n0`, `n1`,
//! ...) because type names contain `<`, `>` and `::`.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use weave_domain::error::Result;
use weave_domain::value_objects::{ExportFormat, GraphSnapshot, TypeKey};

use crate::constants::EXPORT_NODE_PREFIX;

/// Snapshot renderer
pub struct GraphExporter;

impl GraphExporter {
    /// Render `snapshot` in `format`
    pub fn render(snapshot: &GraphSnapshot, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Dot => Ok(Self::to_dot(snapshot)),
            ExportFormat::Mermaid => Ok(Self::to_mermaid(snapshot)),
            ExportFormat::Text => Ok(Self::to_text(snapshot)),
            ExportFormat::Json => Self::to_json(snapshot),
        }
    }

    /// Graphviz digraph; edges inside a cycle are drawn red
    pub fn to_dot(snapshot: &GraphSnapshot) -> String {
        let ids = node_ids(snapshot);
        let cyclic = cyclic_edges(snapshot);
        let mut out = String::from("digraph dependencies {\n    rankdir=LR;\n    node [shape=box];\n");

        for (i, node) in snapshot.nodes.iter().enumerate() {
            let _ = writeln!(
                out,
                "    {EXPORT_NODE_PREFIX}{i} [label=\"{}\"];",
                escape(&node.short_name())
            );
        }
        for edge in &snapshot.edges {
            let (Some(from), Some(to)) = (ids.get(&edge.from), ids.get(&edge.to)) else {
                continue;
            };
            let color = if cyclic.contains(&(edge.from, edge.to)) {
                ", color=red"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "    {from} -> {to} [label=\"{}\"{color}];",
                escape(&edge.label)
            );
        }
        out.push_str("}\n");
        out
    }

    /// Mermaid flowchart; cycles are listed as comments at the end
    pub fn to_mermaid(snapshot: &GraphSnapshot) -> String {
        let ids = node_ids(snapshot);
        let mut out = String::from("graph LR\n");

        for (i, node) in snapshot.nodes.iter().enumerate() {
            let _ = writeln!(
                out,
                "    {EXPORT_NODE_PREFIX}{i}[\"{}\"]",
                mermaid_escape(&node.short_name())
            );
        }
        for edge in &snapshot.edges {
            if let (Some(from), Some(to)) = (ids.get(&edge.from), ids.get(&edge.to)) {
                let _ = writeln!(
                    out,
                    "    {from} -->|\"{}\"| {to}",
                    mermaid_escape(&edge.label)
                );
            }
        }
        for cycle in &snapshot.cycles {
            let _ = writeln!(out, "    %% cycle: {cycle}");
        }
        out
    }

    /// Plain listing of nodes, edges and cycles
    pub fn to_text(snapshot: &GraphSnapshot) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Dependency Graph ===\n");
        let _ = writeln!(out, "--- Types ({}) ---", snapshot.nodes.len());
        for node in &snapshot.nodes {
            let _ = writeln!(out, "  {node}");
        }
        let _ = writeln!(out, "\n--- Dependencies ({}) ---", snapshot.edges.len());
        for edge in &snapshot.edges {
            let _ = writeln!(out, "  {} -> {} [{}]", edge.from, edge.to, edge.label);
        }
        let _ = writeln!(out, "\n--- Cycles ({}) ---", snapshot.cycles.len());
        if snapshot.cycles.is_empty() {
            out.push_str("  none\n");
        }
        for cycle in &snapshot.cycles {
            let _ = writeln!(out, "  {cycle}");
        }
        out
    }

    /// Pretty-printed JSON with `nodes`, `edges` and `cycles`
    pub fn to_json(snapshot: &GraphSnapshot) -> Result<String> {
        Ok(serde_json::to_string_pretty(snapshot)?)
    }
}

fn node_ids(snapshot: &GraphSnapshot) -> HashMap<TypeKey, String> {
    snapshot
        .nodes
        .iter()
        .enumerate()
        .map(|(i, key)| (*key, format!("{EXPORT_NODE_PREFIX}{i}")))
        .collect()
}

fn cyclic_edges(snapshot: &GraphSnapshot) -> HashSet<(TypeKey, TypeKey)> {
    snapshot
        .cycles
        .iter()
        .flat_map(|cycle| {
            cycle
                .nodes()
                .windows(2)
                .map(|pair| (pair[0], pair[1]))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Mermaid has no backslash escapes; it takes HTML-style entity codes
fn mermaid_escape(text: &str) -> String {
    text.replace('"', "#quot;").replace('|', "#124;")
}
