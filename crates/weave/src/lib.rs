//! # Weave
//!
//! A dependency-resolution runtime: a concurrent type registry, a batch
//! scheduler that runs registration modules in strict batch order, and a
//! detector that reports dependency cycles both while resolving and by
//! static analysis of the recorded graph.
//!
//! ## Example
//!
//! ```
//! use weave::WeaveContainer;
//!
//! struct Clock;
//! struct Journal { clock: std::sync::Arc<Clock> }
//!
//! let container = WeaveContainer::new();
//! container.register_instance(Clock).unwrap();
//!
//! let c = container.clone();
//! container
//!     .register_factory(move || Journal {
//!         clock: c.resolve::<Clock>().expect("clock registered"),
//!     })
//!     .unwrap();
//!
//! assert!(container.resolve::<Journal>().is_some());
//! assert!(container.detect_cycles().is_empty());
//! ```
//!
//! ## Architecture
//!
//! - `domain` - type keys, cycle paths, graph values, errors, observer port
//! - `infrastructure` - registry, detector, scheduler, hooks, config, logging

/// Domain layer - pure value types and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use weave_domain::*;
}

/// Infrastructure layer - runtime machinery, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use weave_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the runtime entry points at the crate root
pub use infrastructure::config::{ConfigLoader, RuntimeConfig};
pub use infrastructure::di::{
    CircularDependencyDetector, Container, Module, ReleaseHandle, SchedulerState, TypeRegistry,
    UsageOptimizer, WeaveContainer, init_runtime,
};
pub use infrastructure::logging::init_logging;
