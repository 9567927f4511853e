//! Domain Layer - Weave
//!
//! Pure types shared by every layer of the Weave dependency-resolution
//! runtime. Nothing in this crate locks, spawns or logs; it only describes
//! the values the runtime moves around.
//!
//! ## Contents
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error enum and `Result` alias |
//! | [`value_objects`] | `TypeKey`, `CyclePath`, `DependencyEdge`, analysis and statistics values |
//! | [`ports`] | Observer contract used by the hook table |
//! | [`constants`] | Defaults shared by detector, optimizer and scheduler |
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `serde` / `serde_json` for snapshots and exports
//! - `thiserror` for the error enum

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::RuntimeObserver;
pub use value_objects::{
    ChainAnalysis, CyclePath, DependencyEdge, ExportFormat, GraphSnapshot, GraphStatistics,
    TypeKey, UsageStat,
};
