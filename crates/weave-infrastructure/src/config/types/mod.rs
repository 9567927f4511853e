//! Configuration types module

pub mod app;
pub mod detector;
pub mod logging;
pub mod optimizer;
pub mod registry;
pub mod scheduler;

// Re-export main types
pub use app::RuntimeConfig;
pub use detector::DetectorConfig;
pub use logging::LoggingConfig;
pub use optimizer::OptimizerConfig;
pub use registry::RegistryConfig;
pub use scheduler::SchedulerConfig;
