//! Error handling types

use thiserror::Error;

use crate::value_objects::CyclePath;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Weave runtime
#[derive(Error, Debug)]
pub enum Error {
    /// No entry is registered for the requested type
    ///
    /// `resolve` never raises this; it exists for callers that turn an empty
    /// resolution into a hard failure.
    #[error("Dependency not found: {type_name}")]
    DependencyNotFound {
        /// Diagnostic name of the missing type
        type_name: String,
    },

    /// The live resolution guard found the type already in flight
    #[error("Circular dependency detected: {path}")]
    CircularDependencyDetected {
        /// Ordered chain that closes back on its first element
        path: CyclePath,
    },

    /// Strict registration refused to replace an existing entry
    #[error("Registration conflict: {type_name} is already registered")]
    RegistrationConflict {
        /// Diagnostic name of the conflicting type
        type_name: String,
    },

    /// A fail-fast build stopped because a module in `batch` failed
    #[error("Schedule build failed in batch {batch}: {source}")]
    ScheduleBuildFailure {
        /// Batch whose module raised the first error
        batch: i32,
        /// First error raised in that batch
        #[source]
        source: Box<Error>,
    },

    /// A synchronous bridge gave up waiting on asynchronous state
    #[error("Bridge timeout after {timeout_ms}ms while waiting for {operation}")]
    BridgeTimeout {
        /// What the bridge was waiting for
        operation: String,
        /// Bound that was exceeded
        timeout_ms: u64,
    },

    /// The resolution stack grew past the configured limit
    #[error("Resolution depth {depth} exceeds limit {limit} while resolving {type_name}")]
    ResolutionDepthExceeded {
        /// Type whose resolution was refused
        type_name: String,
        /// Stack depth at the time of the attempt
        depth: usize,
        /// Configured limit
        limit: usize,
    },

    /// A registration module action failed
    #[error("Module error: {message}")]
    Module {
        /// Description of the failure
        message: String,
    },

    /// Operation not valid in the current state
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Description of the state violation
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create a dependency not found error
    pub fn not_found<S: Into<String>>(type_name: S) -> Self {
        Self::DependencyNotFound {
            type_name: type_name.into(),
        }
    }

    /// Create a circular dependency error
    pub fn circular(path: CyclePath) -> Self {
        Self::CircularDependencyDetected { path }
    }

    /// Create a registration conflict error
    pub fn conflict<S: Into<String>>(type_name: S) -> Self {
        Self::RegistrationConflict {
            type_name: type_name.into(),
        }
    }

    /// Wrap the first error of a failed batch
    pub fn build_failure(batch: i32, source: Error) -> Self {
        Self::ScheduleBuildFailure {
            batch,
            source: Box::new(source),
        }
    }

    /// Create a bridge timeout error
    pub fn bridge_timeout<S: Into<String>>(operation: S, timeout_ms: u64) -> Self {
        Self::BridgeTimeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Create a module error
    pub fn module<S: Into<String>>(message: S) -> Self {
        Self::Module {
            message: message.into(),
        }
    }

    /// Create an invalid state error
    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Configuration and I/O error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Inspection helpers
impl Error {
    /// Whether this error (or the error it wraps) is a detected cycle
    pub fn is_circular_dependency(&self) -> bool {
        self.cycle_path().is_some()
    }

    /// The cycle carried by this error, looking through build failures
    pub fn cycle_path(&self) -> Option<&CyclePath> {
        match self {
            Self::CircularDependencyDetected { path } => Some(path),
            Self::ScheduleBuildFailure { source, .. } => source.cycle_path(),
            _ => None,
        }
    }

    /// Whether this error is a bridge timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::BridgeTimeout { .. })
    }
}
