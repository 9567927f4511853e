//! # Infrastructure Layer
//!
//! Runtime machinery behind the domain types of `weave-domain`.
//!
//! ## Module Categories
//!
//! ### Dependency Runtime
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Registry, cycle detector, batch scheduler, hooks, facade |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | figment-based configuration (defaults, TOML, `WEAVE_` env) |
//! | [`constants`] | Centralized infrastructure constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`utils`] | Timing helpers for log fields |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod utils;

// Re-export commonly used types
pub use di::{WeaveContainer, init_runtime};
pub use error_ext::ErrorContext;
pub use utils::TimedOperation;
