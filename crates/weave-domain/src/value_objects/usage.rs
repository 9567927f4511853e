//! Usage counters

use serde::Serialize;

use super::TypeKey;

/// Value Object: per-type usage counters
///
/// Counters only grow until an explicit reset. They drive classification
/// ("frequently used", "unused") and never correctness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageStat {
    /// Type the counters belong to
    pub key: TypeKey,
    /// Number of registrations observed
    pub registrations: u64,
    /// Number of successful resolutions observed
    pub resolutions: u64,
    /// Number of resolutions that found nothing
    pub nil_resolutions: u64,
}

impl UsageStat {
    /// Empty counters for `key`
    pub fn new(key: TypeKey) -> Self {
        Self {
            key,
            registrations: 0,
            resolutions: 0,
            nil_resolutions: 0,
        }
    }

    /// Whether the type was resolved at least `threshold` times
    pub fn is_frequent(&self, threshold: u64) -> bool {
        self.resolutions >= threshold
    }

    /// Whether the type was registered but never resolved
    pub fn is_unused(&self) -> bool {
        self.registrations > 0 && self.resolutions == 0
    }
}
