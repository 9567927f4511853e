//! Elapsed-time tracking for batch and build log fields

use std::time::{Duration, Instant};

/// Wall-clock timer started at construction
///
/// ```
/// use weave_infrastructure::utils::TimedOperation;
///
/// let timer = TimedOperation::start();
/// assert!(timer.elapsed_ms() < 60_000);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimedOperation {
    started: Instant,
}

impl TimedOperation {
    /// Start timing now
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Milliseconds since start, saturating at `u64::MAX`
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Time since start
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
