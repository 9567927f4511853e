//! Runtime configuration
//!
//! Section structs live in [`types`]; [`loader`] merges defaults, a TOML
//! file and `WEAVE_` environment variables into a [`RuntimeConfig`].

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
