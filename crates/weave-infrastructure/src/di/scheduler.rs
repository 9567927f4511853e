//! Batch Scheduler - ordered, concurrent execution of registration modules
//!
//! A [`Container`] collects [`Module`]s, each tagged with a batch number and
//! an insertion index, and executes them on `build()`:
//!
//! ```text
//! batch 0: [m0, m1, m2]  ──spawn all──► join all ──┐
//!                                                   ▼ (barrier)
//! batch 1: [m3]          ──spawn all──► join all ──┐
//!                                                   ▼
//! batch 5: [m4, m5]      ──spawn all──► join all ──► Built
//! ```
//!
//! Batches run in ascending order and batch N is fully joined before batch
//! N+1 starts. Inside a batch, modules are spawned in insertion order but
//! may finish in any order. Two modules of one batch registering the same
//! type therefore race: the one that executes last wins, whatever their
//! insertion order.
//!
//! ## Failure policies
//!
//! The policy is chosen per call:
//!
//! - [`Container::build`] stops after the first batch containing a failure
//!   and returns the first error to complete, wrapped in
//!   `ScheduleBuildFailure`. The rest of that batch still runs.
//! - [`Container::build_ignoring_errors`] runs every batch, hands each
//!   error to a callback and returns the number of failed modules.
//!
//! ## Cancellation
//!
//! Once a batch starts it runs to completion. Modules are spawned as
//! detached tasks, so a caller that drops the build future (typically
//! through `tokio::time::timeout`) stops waiting but aborts nothing.
//! Later batches stay pending and the container stays `Building`; further
//! builds are refused until [`Container::reset`].

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::time::Duration;
use tokio::task::JoinError;
use tracing::{debug, error, info, warn};
use weave_domain::error::{Error, Result};

use super::bridge::block_on_with_timeout;
use crate::utils::TimedOperation;

/// Future produced by a module action
pub type ModuleFuture = BoxFuture<'static, Result<()>>;

type ModuleAction<C> = Box<dyn FnOnce(C) -> ModuleFuture + Send>;

/// Lifecycle of a [`Container`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulerState {
    /// Nothing registered yet
    Empty,
    /// Modules are pending
    Collecting,
    /// A build is running
    Building,
    /// The last build succeeded; further registrations are refused
    Built,
}

impl std::fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Collecting => "collecting",
            Self::Building => "building",
            Self::Built => "built",
        };
        f.write_str(name)
    }
}

/// A deferred registration unit
///
/// The action receives the container's context (the facade, for containers
/// created through `WeaveContainer::scheduler`) and runs at most once.
pub struct Module<C = ()> {
    batch: i32,
    insertion_index: u64,
    action: ModuleAction<C>,
}

impl<C: Send + 'static> Module<C> {
    /// Module whose action is asynchronous
    pub fn new<F, Fut>(batch: i32, action: F) -> Self
    where
        F: FnOnce(C) -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            batch,
            insertion_index: 0,
            action: Box::new(move |ctx| Box::pin(action(ctx))),
        }
    }

    /// Module whose action is plain synchronous code
    pub fn sync<F>(batch: i32, action: F) -> Self
    where
        F: FnOnce(C) -> Result<()> + Send + 'static,
    {
        Self::new(batch, move |ctx| async move { action(ctx) })
    }

    /// Batch this module belongs to
    pub fn batch(&self) -> i32 {
        self.batch
    }

    /// Position assigned when the module was added to a container
    pub fn insertion_index(&self) -> u64 {
        self.insertion_index
    }
}

impl<C> std::fmt::Debug for Module<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("batch", &self.batch)
            .field("insertion_index", &self.insertion_index)
            .finish_non_exhaustive()
    }
}

/// Batch scheduler
///
/// ## Example
///
/// ```no_run
/// use weave_infrastructure::di::Container;
///
/// # async fn run() -> weave_domain::Result<()> {
/// let mut container = Container::new()
///     .register(0, |_| async { Ok(()) })
///     .register(1, |_| async { Ok(()) });
/// container.build().await?;
/// # Ok(())
/// # }
/// ```
pub struct Container<C = ()> {
    context: C,
    modules: Vec<Module<C>>,
    next_index: u64,
    state: SchedulerState,
}

impl Container<()> {
    /// Container whose modules take no context
    pub fn new() -> Self {
        Self::with_context(())
    }
}

impl Default for Container<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Container<C>
where
    C: Clone + Send + 'static,
{
    /// Container handing a clone of `context` to every module
    pub fn with_context(context: C) -> Self {
        Self {
            context,
            modules: Vec::new(),
            next_index: 0,
            state: SchedulerState::Empty,
        }
    }

    // ========================================================================
    // Collection
    // ========================================================================

    /// Add an async module (builder style)
    ///
    /// Modules offered after a successful build are dropped with a warning;
    /// use [`Self::add`] to observe the refusal.
    #[must_use]
    pub fn register<F, Fut>(mut self, batch: i32, action: F) -> Self
    where
        F: FnOnce(C) -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        if let Err(e) = self.add(Module::new(batch, action)) {
            warn!(batch, error = %e, "Module dropped");
        }
        self
    }

    /// Add a synchronous module (builder style)
    #[must_use]
    pub fn register_sync<F>(mut self, batch: i32, action: F) -> Self
    where
        F: FnOnce(C) -> Result<()> + Send + 'static,
    {
        if let Err(e) = self.add(Module::sync(batch, action)) {
            warn!(batch, error = %e, "Module dropped");
        }
        self
    }

    /// Add a module, assigning its insertion index
    ///
    /// # Errors
    ///
    /// `InvalidState` while building or after a successful build.
    pub fn add(&mut self, mut module: Module<C>) -> Result<()> {
        match self.state {
            SchedulerState::Empty | SchedulerState::Collecting => {}
            state => {
                return Err(Error::invalid_state(format!(
                    "cannot register modules while the scheduler is {state}"
                )));
            }
        }
        module.insertion_index = self.next_index;
        self.next_index += 1;
        debug!(
            batch = module.batch,
            insertion_index = module.insertion_index,
            "Module registered"
        );
        self.modules.push(module);
        self.state = SchedulerState::Collecting;
        Ok(())
    }

    /// Current lifecycle state
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Number of modules waiting for a build
    pub fn pending(&self) -> usize {
        self.modules.len()
    }

    /// Distinct batch numbers of the pending modules, ascending
    pub fn pending_batches(&self) -> Vec<i32> {
        let mut batches: Vec<i32> = self.modules.iter().map(|m| m.batch).collect();
        batches.sort_unstable();
        batches.dedup();
        batches
    }

    /// Drop pending modules and return to `Empty`
    pub fn reset(&mut self) {
        self.modules.clear();
        self.next_index = 0;
        self.state = SchedulerState::Empty;
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Run every batch, stopping after the first batch with a failure
    ///
    /// Calling it again after success processes nothing. After a failure the
    /// unrun modules are discarded and the container is `Empty` again.
    ///
    /// Dropping the returned future (a caller-side timeout, for instance)
    /// does not abort the batch in flight: its modules keep running
    /// detached. Batches that had not started stay pending and the
    /// container stays `Building` until [`Self::reset`].
    ///
    /// # Errors
    ///
    /// `ScheduleBuildFailure` carrying the failing batch and the first error
    /// (by completion order) of that batch. A panicking module counts as an
    /// `Error::Module` failure. `InvalidState` while a previous build is
    /// still `Building`.
    pub async fn build(&mut self) -> Result<()> {
        if !self.begin_build()? {
            return Ok(());
        }
        let timer = TimedOperation::start();
        let mut batches = 0usize;

        while let Some((batch, modules)) = self.next_batch() {
            batches += 1;
            let results = run_batch(batch, modules, &self.context).await;
            if let Some(err) = results.into_iter().find_map(Result::err) {
                error!(batch, error = %err, "Batch failed, aborting build");
                self.modules.clear();
                self.state = SchedulerState::Empty;
                return Err(Error::build_failure(batch, err));
            }
        }

        self.state = SchedulerState::Built;
        info!(batches, elapsed_ms = timer.elapsed_ms(), "Build completed");
        Ok(())
    }

    /// Run every batch regardless of failures
    ///
    /// Each failure is passed to `on_error` with its batch number. Returns
    /// the number of failed modules; the container ends up `Built` either
    /// way. While a previous build is still `Building` nothing runs and 0
    /// is returned.
    pub async fn build_ignoring_errors<F>(&mut self, mut on_error: F) -> usize
    where
        F: FnMut(i32, &Error),
    {
        match self.begin_build() {
            Ok(true) => {}
            Ok(false) => return 0,
            Err(e) => {
                warn!(error = %e, "Build refused");
                return 0;
            }
        }
        let timer = TimedOperation::start();
        let mut failures = 0;

        while let Some((batch, modules)) = self.next_batch() {
            for err in run_batch(batch, modules, &self.context)
                .await
                .into_iter()
                .filter_map(Result::err)
            {
                warn!(batch, error = %err, "Module failed, continuing");
                on_error(batch, &err);
                failures += 1;
            }
        }

        self.state = SchedulerState::Built;
        info!(
            failures,
            elapsed_ms = timer.elapsed_ms(),
            "Build completed ignoring errors"
        );
        failures
    }

    /// Fail-fast build driven from synchronous code
    ///
    /// The pending modules move to a worker thread. If `timeout` passes
    /// first the worker keeps running, this returns `BridgeTimeout` and the
    /// container stays `Building` until [`Self::reset`].
    pub fn build_blocking(&mut self, timeout: Duration) -> Result<()> {
        match self.state {
            SchedulerState::Built => return Ok(()),
            SchedulerState::Building => return Err(building_refusal()),
            SchedulerState::Empty | SchedulerState::Collecting => {}
        }
        let mut detached = Self {
            context: self.context.clone(),
            modules: std::mem::take(&mut self.modules),
            next_index: self.next_index,
            state: self.state,
        };
        self.state = SchedulerState::Building;

        let outcome = block_on_with_timeout("scheduler build", timeout, move || async move {
            detached.build().await.map(|()| detached.state)
        });
        match outcome {
            Ok(state) => {
                self.state = state;
                Ok(())
            }
            Err(e) if e.is_timeout() => Err(e),
            Err(e) => {
                self.state = SchedulerState::Empty;
                Err(e)
            }
        }
    }

    /// Enter `Building` with the pending modules sorted for execution
    ///
    /// `Ok(false)` after a successful build; `InvalidState` while building.
    fn begin_build(&mut self) -> Result<bool> {
        match self.state {
            SchedulerState::Built => {
                debug!("Build requested after success, nothing to do");
                return Ok(false);
            }
            SchedulerState::Building => return Err(building_refusal()),
            SchedulerState::Empty | SchedulerState::Collecting => {}
        }
        self.state = SchedulerState::Building;
        self.modules.sort_by_key(|m| (m.batch, m.insertion_index));
        info!(batches = self.pending_batches().len(), "Starting build");
        Ok(true)
    }

    /// Detach the lowest pending batch; the rest stays in `self.modules`
    fn next_batch(&mut self) -> Option<(i32, Vec<Module<C>>)> {
        let batch = self.modules.first()?.batch;
        let split = self
            .modules
            .iter()
            .position(|m| m.batch != batch)
            .unwrap_or(self.modules.len());
        let rest = self.modules.split_off(split);
        Some((batch, std::mem::replace(&mut self.modules, rest)))
    }
}

fn building_refusal() -> Error {
    Error::invalid_state("a build is still running; reset the scheduler first")
}

impl<C> std::fmt::Debug for Container<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("state", &self.state)
            .field("pending", &self.modules.len())
            .finish_non_exhaustive()
    }
}

/// Spawn every module of one batch and join them all
///
/// Results come back in completion order. Tasks are spawned detached, so
/// dropping this future leaves them running to completion.
async fn run_batch<C>(batch: i32, modules: Vec<Module<C>>, context: &C) -> Vec<Result<()>>
where
    C: Clone + Send + 'static,
{
    let timer = TimedOperation::start();
    let count = modules.len();
    let mut running: FuturesUnordered<_> = modules
        .into_iter()
        .map(|module| {
            let ctx = context.clone();
            let action = module.action;
            tokio::spawn(async move { action(ctx).await })
        })
        .collect();

    let mut results = Vec::with_capacity(count);
    while let Some(joined) = running.next().await {
        results.push(joined.unwrap_or_else(|e| Err(join_failure(batch, &e))));
    }
    debug!(
        batch,
        modules = count,
        elapsed_ms = timer.elapsed_ms(),
        "Batch finished"
    );
    results
}

fn join_failure(batch: i32, err: &JoinError) -> Error {
    if err.is_panic() {
        Error::module(format!("module in batch {batch} panicked"))
    } else {
        Error::module(format!("module in batch {batch} did not finish: {err}"))
    }
}
