//! Synchronous bridge over async work
//!
//! Runs a future on a dedicated worker thread with its own current-thread
//! runtime and waits for it with a hard deadline. The caller never blocks
//! longer than the timeout; when the deadline passes the worker keeps running
//! to completion and its result is discarded.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};
use weave_domain::error::{Error, Result};

use crate::error_ext::ErrorContext;
use crate::utils::TimedOperation;

/// Drive `make_future()` to completion, waiting at most `timeout`
///
/// `make_future` is called on the worker thread, so the future itself does
/// not need to be `Send`.
///
/// # Errors
///
/// - `BridgeTimeout` when the deadline passes first.
/// - `Internal` when the worker thread dies before reporting.
/// - Whatever the future itself returns.
pub fn block_on_with_timeout<T, F, Fut>(
    operation: &str,
    timeout: Duration,
    make_future: F,
) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T>>,
{
    let (tx, rx) = mpsc::sync_channel(1);
    let timer = TimedOperation::start();

    thread::Builder::new()
        .name(format!("weave-bridge-{operation}"))
        .spawn(move || {
            let outcome = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .io_context("Failed to start bridge runtime")
                .and_then(|runtime| runtime.block_on(make_future()));
            // The receiver is gone after a timeout; nothing left to report to
            let _ = tx.send(outcome);
        })
        .io_context("Failed to spawn bridge thread")?;

    match rx.recv_timeout(timeout) {
        Ok(outcome) => {
            debug!(operation, elapsed_ms = timer.elapsed_ms(), "Bridge completed");
            outcome
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            warn!(operation, timeout_ms, "Bridge wait exceeded its deadline");
            Err(Error::bridge_timeout(operation, timeout_ms))
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(Error::internal(format!(
            "Bridge worker for {operation} stopped without a result"
        ))),
    }
}
