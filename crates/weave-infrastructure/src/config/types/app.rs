//! Top-level runtime configuration

use serde::{Deserialize, Serialize};

use super::{DetectorConfig, LoggingConfig, OptimizerConfig, RegistryConfig, SchedulerConfig};

/// Runtime configuration
///
/// Every section falls back to its defaults, so a TOML file only needs the
/// keys it changes:
///
/// ```toml
/// [detector]
/// auto_record_edges = true
///
/// [optimizer]
/// frequent_threshold = 50
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Circular dependency detector configuration
    #[serde(default)]
    pub detector: DetectorConfig,
    /// Usage optimizer configuration
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    /// Batch scheduler configuration
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Type registry configuration
    #[serde(default)]
    pub registry: RegistryConfig,
}
