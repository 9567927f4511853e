//! Utility helpers

pub mod timing;

pub use timing::TimedOperation;
