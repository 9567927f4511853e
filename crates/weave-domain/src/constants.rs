//! Domain layer constants
//!
//! Defaults used by the detector, optimizer and scheduler. Infrastructure
//! specific constants (config file names, env prefixes) remain in
//! `weave_infrastructure::constants`.

// ============================================================================
// DETECTOR CONSTANTS
// ============================================================================

/// Maximum number of in-flight resolutions before the live guard gives up
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 128;

/// Label used for edges recorded automatically during resolution
pub const AUTO_EDGE_LABEL: &str = "resolve";

/// Label used for edges declared without an explicit label
pub const DEFAULT_EDGE_LABEL: &str = "depends_on";

// ============================================================================
// HEALTH SCORE CONSTANTS
// ============================================================================

/// Best possible health score
pub const HEALTH_SCORE_MAX: u8 = 100;

/// Points removed for every distinct cycle in the graph
pub const HEALTH_CYCLE_PENALTY: f64 = 25.0;

/// Average fan-out tolerated before the score starts dropping
pub const HEALTH_FAN_OUT_BUDGET: f64 = 3.0;

/// Points removed per unit of average fan-out above the budget
pub const HEALTH_FAN_OUT_PENALTY: f64 = 5.0;

// ============================================================================
// OPTIMIZER CONSTANTS
// ============================================================================

/// Resolutions needed before a type is classified as frequently used
pub const DEFAULT_FREQUENT_THRESHOLD: u64 = 10;

/// Default length of the "top used" report
pub const DEFAULT_TOP_N: usize = 10;

// ============================================================================
// SCHEDULER CONSTANTS
// ============================================================================

/// Default bounded wait for sync bridges over async work (milliseconds)
pub const DEFAULT_BRIDGE_TIMEOUT_MS: u64 = 5_000;
