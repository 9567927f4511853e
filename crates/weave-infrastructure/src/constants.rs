//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Resolution and scoring defaults are defined in `weave_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "weave.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "weave";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "WEAVE";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "WEAVE_LOG";

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 5;

/// File stem used when the configured log path has none
pub const LOG_DEFAULT_FILE_STEM: &str = "weave";

// ============================================================================
// EXPORT CONSTANTS
// ============================================================================

/// Identifier used for nodes in DOT and Mermaid output
pub const EXPORT_NODE_PREFIX: &str = "n";
