//! Domain Port Interfaces
//!
//! Contracts the runtime calls through without knowing the implementor.
//!
//! - **observer** - Hook contract for cross-cutting observers (usage
//!   optimizer, auto edge recording, user supplied listeners)

/// Runtime observer hooks
pub mod observer;

pub use observer::RuntimeObserver;
