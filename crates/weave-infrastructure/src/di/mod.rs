//! Dependency Runtime - registry, cycle detection and batch scheduling
//!
//! ## Architecture Overview
//!
//! ```text
//! WeaveContainer (bootstrap)
//! ├── TypeRegistry ── ReleaseHandle (weak, generation-guarded)
//! ├── CircularDependencyDetector
//! │   ├── resolution stack (live guard)
//! │   └── DependencyGraph (static scan, chain analysis, export)
//! ├── HookTable ── UsageOptimizer (+ user observers)
//! └── Container (batch scheduler, sync bridge)
//! ```
//!
//! ## Key Principles
//!
//! - **Serialized detector state**: stack and graph sit behind one mutex and
//!   are reached only through the detector's methods
//! - **No lock across user code**: factories and hooks run after every
//!   internal guard is dropped
//! - **Observers through hooks**: the registry never names the optimizer
//! - **Bounded bridges**: synchronous waits on async work carry a deadline

pub mod bootstrap;
pub mod bridge;
pub mod detector;
pub mod export;
pub mod graph;
pub mod handles;
pub mod hooks;
pub mod optimizer;
pub mod registry;
pub mod scheduler;

pub use bootstrap::{WeaveContainer, init_runtime, init_test_runtime};
pub use bridge::block_on_with_timeout;
pub use detector::{CircularDependencyDetector, ResolutionGuard};
pub use export::GraphExporter;
pub use graph::DependencyGraph;
pub use handles::ReleaseHandle;
pub use hooks::HookTable;
pub use optimizer::UsageOptimizer;
pub use registry::{AnyValue, FactoryFn, RegistryEntry, TypeRegistry};
pub use scheduler::{Container, Module, ModuleFuture, SchedulerState};
