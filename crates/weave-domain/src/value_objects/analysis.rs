//! Reachability and statistics reports

use serde::Serialize;

use super::TypeKey;
use crate::constants::{
    HEALTH_CYCLE_PENALTY, HEALTH_FAN_OUT_BUDGET, HEALTH_FAN_OUT_PENALTY, HEALTH_SCORE_MAX,
};

/// Value Object: dependency chain report for one type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainAnalysis {
    /// Type the walk started from
    pub root: TypeKey,
    /// Types `root` depends on directly
    pub direct_dependencies: Vec<TypeKey>,
    /// Transitive closure of dependencies, `root` excluded
    pub all_dependencies: Vec<TypeKey>,
    /// Longest shortest-path distance reached by the walk
    pub max_depth: usize,
    /// Whether `root` appears in any cycle detected so far
    pub has_cycles: bool,
}

/// Value Object: aggregate dependency graph metrics
///
/// Used for diagnostics only; nothing in the runtime branches on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    /// Number of known types
    pub total_types: usize,
    /// Number of edges, labels counted separately
    pub total_edges: usize,
    /// Mean number of distinct dependencies per type
    pub avg_fan_out: f64,
    /// Largest number of distinct dependencies of a single type
    pub max_fan_out: usize,
    /// Types with neither dependencies nor dependents
    pub isolated_types: usize,
    /// Number of distinct cycles
    pub cycle_count: usize,
    /// Derived score in `0..=100`
    pub health_score: u8,
}

impl GraphStatistics {
    /// Derive the health score from cycle count and average fan-out
    ///
    /// Every cycle costs a fixed penalty; fan-out above the budget costs a
    /// proportional one. The result is clamped to `0..=100`.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn health_score_for(cycle_count: usize, avg_fan_out: f64) -> u8 {
        let cycle_penalty = HEALTH_CYCLE_PENALTY * cycle_count as f64;
        let fan_out_penalty = (avg_fan_out - HEALTH_FAN_OUT_BUDGET).max(0.0) * HEALTH_FAN_OUT_PENALTY;
        let score = (f64::from(HEALTH_SCORE_MAX) - cycle_penalty - fan_out_penalty)
            .clamp(0.0, f64::from(HEALTH_SCORE_MAX));
        score.floor() as u8
    }

    /// Whether the graph is free of cycles
    pub fn is_acyclic(&self) -> bool {
        self.cycle_count == 0
    }
}
