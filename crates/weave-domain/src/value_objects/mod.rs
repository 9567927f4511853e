//! Domain Value Objects
//!
//! Immutable values the runtime hands across component boundaries.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`TypeKey`] | Stable identity of a registered type |
//! | [`CyclePath`] | Ordered dependency chain closing back on its start |
//! | [`DependencyEdge`] | Labeled directed edge between two type keys |
//! | [`ChainAnalysis`] | Reachability report for a single type |
//! | [`GraphStatistics`] | Aggregate graph metrics and health score |
//! | [`GraphSnapshot`] | Point-in-time copy of nodes, edges and cycles |
//! | [`UsageStat`] | Registration/resolution counters for one type |

/// Reachability and statistics reports
pub mod analysis;
/// Cycle paths
pub mod cycle;
/// Graph edges, snapshots and export formats
pub mod graph;
/// Type identity
pub mod type_key;
/// Usage counters
pub mod usage;

pub use analysis::{ChainAnalysis, GraphStatistics};
pub use cycle::CyclePath;
pub use graph::{DependencyEdge, ExportFormat, GraphSnapshot};
pub use type_key::TypeKey;
pub use usage::UsageStat;
