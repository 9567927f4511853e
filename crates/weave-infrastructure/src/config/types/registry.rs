//! Type registry configuration types

use serde::{Deserialize, Serialize};

/// Type registry configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Refuse to replace an existing entry instead of last-write-wins
    pub reject_overrides: bool,
}
