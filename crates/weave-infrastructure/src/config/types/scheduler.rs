//! Batch scheduler configuration types

use serde::{Deserialize, Serialize};
use std::time::Duration;
use weave_domain::constants::DEFAULT_BRIDGE_TIMEOUT_MS;

/// Batch scheduler configuration
///
/// The failure policy is picked per `build` call, never here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Bounded wait for synchronous builds (milliseconds)
    pub bridge_timeout_ms: u64,
}

impl SchedulerConfig {
    /// Bridge timeout as a `Duration`
    pub fn bridge_timeout(&self) -> Duration {
        Duration::from_millis(self.bridge_timeout_ms)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            bridge_timeout_ms: DEFAULT_BRIDGE_TIMEOUT_MS,
        }
    }
}
