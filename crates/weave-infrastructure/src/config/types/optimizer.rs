//! Usage optimizer configuration types

use serde::{Deserialize, Serialize};
use weave_domain::constants::{DEFAULT_FREQUENT_THRESHOLD, DEFAULT_TOP_N};

/// Usage optimizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Count registrations and resolutions
    pub enabled: bool,

    /// Resolutions needed to classify a type as frequently used
    pub frequent_threshold: u64,

    /// Length of the "top used" report
    pub top_n: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frequent_threshold: DEFAULT_FREQUENT_THRESHOLD,
            top_n: DEFAULT_TOP_N,
        }
    }
}
