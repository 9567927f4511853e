//! Graph Value Objects
//!
//! Edges, read-only snapshots and the formats a snapshot can be rendered in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{CyclePath, TypeKey};
use crate::error::Error;

/// Value Object: labeled directed dependency edge
///
/// `from` depends on `to`. Edges form a set: the same triple recorded twice
/// is one edge, while two labels between the same pair are two edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyEdge {
    /// Dependent type
    pub from: TypeKey,
    /// Dependency
    pub to: TypeKey,
    /// Free-form description of the relation
    pub label: String,
}

impl DependencyEdge {
    /// Create a new edge
    pub fn new<S: Into<String>>(from: TypeKey, to: TypeKey, label: S) -> Self {
        Self {
            from,
            to,
            label: label.into(),
        }
    }
}

/// Value Object: point-in-time copy of the dependency graph
///
/// Produced under the detector's lock and rendered without it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphSnapshot {
    /// Every known type, in insertion order
    pub nodes: Vec<TypeKey>,
    /// Every recorded edge
    pub edges: Vec<DependencyEdge>,
    /// Cycles found by a static scan at snapshot time
    pub cycles: Vec<CyclePath>,
}

/// Textual rendering targets for a [`GraphSnapshot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Graphviz DOT
    Dot,
    /// Mermaid flowchart
    Mermaid,
    /// Indented plain text
    Text,
    /// JSON document
    Json,
}

impl ExportFormat {
    /// Every supported format
    pub const ALL: [ExportFormat; 4] = [Self::Dot, Self::Mermaid, Self::Text, Self::Json];

    /// Lowercase name used in configuration and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Mermaid => "mermaid",
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Ok(Self::Dot),
            "mermaid" => Ok(Self::Mermaid),
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::configuration(format!(
                "Unknown export format: {other}. Use dot, mermaid, text, or json"
            ))),
        }
    }
}
