//! Circular dependency detector configuration types

use serde::{Deserialize, Serialize};
use weave_domain::constants::DEFAULT_MAX_RESOLUTION_DEPTH;

/// Detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Report cycles found by the live resolution guard
    pub detection_enabled: bool,

    /// Record an edge whenever a type resolves another mid-resolution
    pub auto_record_edges: bool,

    /// Maximum resolution stack depth
    pub max_resolution_depth: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            detection_enabled: true,
            auto_record_edges: false,
            max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
        }
    }
}
