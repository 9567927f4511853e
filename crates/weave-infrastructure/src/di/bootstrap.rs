//! Runtime Bootstrap - composition root and typed facade
//!
//! [`init_runtime`] wires the components together once:
//!
//! ```text
//! RuntimeConfig ──► HookTable ◄── UsageOptimizer (installed observer)
//!                      ▲
//!                      │ on_register / on_resolve / on_nil_resolution
//!                      │
//!       TypeRegistry ──┴── WeaveContainer ──► CircularDependencyDetector
//!                                │               (stack + graph)
//!                                └──► Container<WeaveContainer> (batches)
//! ```
//!
//! ## Resolution flow
//!
//! 1. Auto edge `top-of-stack -> T` (when enabled)
//! 2. Detector push (fails on a live cycle)
//! 3. Registry read, factory invoked outside the lock
//! 4. `on_resolve` / `on_nil_resolution` hooks
//! 5. Detector pop (guard drop, also on panic)
//!
//! ## Usage
//!
//! ```
//! use weave_infrastructure::di::WeaveContainer;
//!
//! struct Settings { name: &'static str }
//! struct Greeter { greeting: String }
//!
//! let container = WeaveContainer::new();
//! container.register_instance(Settings { name: "weave" }).unwrap();
//!
//! let c = container.clone();
//! container
//!     .register_factory(move || {
//!         let name = c.resolve::<Settings>().map_or("nobody", |s| s.name);
//!         Greeter { greeting: format!("hello {name}") }
//!     })
//!     .unwrap();
//!
//! let greeter = container.resolve::<Greeter>().unwrap();
//! assert_eq!(greeter.greeting, "hello weave");
//! ```

use std::any::Any;
use std::sync::Arc;
use tracing::{debug, info, warn};
use weave_domain::error::{Error, Result};
use weave_domain::ports::RuntimeObserver;
use weave_domain::value_objects::{
    ChainAnalysis, CyclePath, ExportFormat, GraphStatistics, TypeKey,
};

use super::detector::CircularDependencyDetector;
use super::export::GraphExporter;
use super::handles::ReleaseHandle;
use super::hooks::HookTable;
use super::optimizer::UsageOptimizer;
use super::registry::{RegistryEntry, TypeRegistry, factory_entry};
use super::scheduler::Container;
use crate::config::RuntimeConfig;
use crate::config::loader::validate_runtime_config;

struct RuntimeInner {
    config: RuntimeConfig,
    hooks: Arc<HookTable>,
    registry: TypeRegistry,
    detector: Arc<CircularDependencyDetector>,
    optimizer: Arc<UsageOptimizer>,
}

/// Facade over registry, detector, optimizer and scheduler
///
/// Cloning is cheap; clones share every component. Factories usually
/// capture a clone to resolve their own dependencies.
#[derive(Clone)]
pub struct WeaveContainer {
    inner: Arc<RuntimeInner>,
}

impl WeaveContainer {
    /// Container with default configuration
    pub fn new() -> Self {
        Self::compose(RuntimeConfig::default())
    }

    /// Container with a validated configuration
    pub fn with_config(config: RuntimeConfig) -> Result<Self> {
        validate_runtime_config(&config)?;
        Ok(Self::compose(config))
    }

    fn compose(config: RuntimeConfig) -> Self {
        let hooks = Arc::new(HookTable::new());
        let optimizer = UsageOptimizer::install(config.optimizer.clone(), &hooks);
        let registry = TypeRegistry::new(Arc::clone(&hooks));
        let detector = Arc::new(CircularDependencyDetector::new(&config.detector));
        Self {
            inner: Arc::new(RuntimeInner {
                config,
                hooks,
                registry,
                detector,
                optimizer,
            }),
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a factory invoked on every resolution of `T`
    ///
    /// # Errors
    ///
    /// `RegistrationConflict` when `registry.reject_overrides` is set and
    /// `T` is already registered.
    pub fn register_factory<T, F>(&self, factory: F) -> Result<ReleaseHandle>
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.register_entry(TypeKey::of::<T>(), factory_entry(factory))
    }

    /// Register an instance returned on every resolution of `T`
    pub fn register_instance<T>(&self, value: T) -> Result<ReleaseHandle>
    where
        T: Any + Send + Sync,
    {
        self.register_shared(Arc::new(value))
    }

    /// Register an already shared instance of `T`
    pub fn register_shared<T>(&self, value: Arc<T>) -> Result<ReleaseHandle>
    where
        T: Any + Send + Sync,
    {
        self.register_entry(TypeKey::of::<T>(), RegistryEntry::Instance(value))
    }

    fn register_entry(&self, key: TypeKey, entry: RegistryEntry) -> Result<ReleaseHandle> {
        let handle = if self.inner.config.registry.reject_overrides {
            self.inner.registry.try_register_entry(key, entry)?
        } else {
            self.inner.registry.register_entry(key, entry)
        };
        self.inner.detector.record_type(key);
        Ok(handle)
    }

    /// Remove the entry for `T`; returns whether one existed
    pub fn release<T: Any>(&self) -> bool {
        self.inner.registry.release_type::<T>()
    }

    /// Whether `T` is registered
    pub fn is_registered<T: Any>(&self) -> bool {
        self.inner.registry.contains(&TypeKey::of::<T>())
    }

    /// Number of registered types
    pub fn registered_count(&self) -> usize {
        self.inner.registry.len()
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve `T`, surfacing live cycle and depth errors
    ///
    /// `Ok(None)` means nothing is registered for `T`.
    ///
    /// The detector's stack is shared by every caller. Two threads resolving
    /// the same type at the same instant see each other's push and the
    /// second gets `CircularDependencyDetected`. Hot concurrent paths either
    /// turn live detection off or read through [`Self::registry`].
    pub fn try_resolve<T>(&self) -> Result<Option<Arc<T>>>
    where
        T: Any + Send + Sync,
    {
        let key = TypeKey::of::<T>();
        let detector = &self.inner.detector;
        detector.record_auto_edge_if_enabled(key);
        let _guard = detector.enter(key)?;

        let value = self.inner.registry.resolve::<T>();
        if value.is_some() {
            self.inner.hooks.on_resolve(&key);
        } else {
            debug!(type_name = %key, "Nothing registered");
            self.inner.hooks.on_nil_resolution(&key);
        }
        Ok(value)
    }

    /// Resolve `T`; `None` when missing or refused by the cycle guard
    pub fn resolve<T>(&self) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        match self.try_resolve::<T>() {
            Ok(value) => value,
            Err(e) => {
                warn!(type_name = %TypeKey::of::<T>(), error = %e, "Resolution refused");
                None
            }
        }
    }

    /// Resolve `T` or fall back to `fallback`
    pub fn resolve_or<T>(&self, fallback: T) -> Arc<T>
    where
        T: Any + Send + Sync,
    {
        self.resolve::<T>().unwrap_or_else(|| Arc::new(fallback))
    }

    /// Resolve `T`, treating absence as an error
    ///
    /// # Errors
    ///
    /// `DependencyNotFound` when nothing is registered, plus everything
    /// [`Self::try_resolve`] returns.
    pub fn require<T>(&self) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.try_resolve::<T>()?
            .ok_or_else(|| Error::not_found(TypeKey::of::<T>().name()))
    }

    // ========================================================================
    // Graph
    // ========================================================================

    /// Declare that `A` depends on `B`
    pub fn depends_on<A: Any, B: Any>(&self, label: &str) -> bool {
        self.inner
            .detector
            .record_labeled_dependency(TypeKey::of::<A>(), TypeKey::of::<B>(), label)
    }

    /// Scan the dependency graph for cycles
    pub fn detect_cycles(&self) -> Vec<CyclePath> {
        self.inner.detector.detect_all_circular_dependencies()
    }

    /// Reachability report for `T`
    pub fn analyze<T: Any>(&self) -> ChainAnalysis {
        self.inner
            .detector
            .analyze_dependency_chain(&TypeKey::of::<T>())
    }

    /// Graph metrics and health score
    pub fn graph_statistics(&self) -> GraphStatistics {
        self.inner.detector.graph_statistics()
    }

    /// Order in which dependencies precede dependents
    pub fn initialization_order(&self) -> Result<Vec<TypeKey>> {
        self.inner.detector.initialization_order()
    }

    /// Render the graph, waiting at most the configured bridge timeout
    pub fn export_graph(&self, format: ExportFormat) -> Result<String> {
        let snapshot = self
            .inner
            .detector
            .snapshot(self.inner.config.scheduler.bridge_timeout())?;
        GraphExporter::render(&snapshot, format)
    }

    // ========================================================================
    // Components
    // ========================================================================

    /// Start a batch scheduler whose modules receive this container
    pub fn scheduler(&self) -> Container<WeaveContainer> {
        Container::with_context(self.clone())
    }

    /// Install an additional runtime observer
    pub fn install_observer(&self, observer: Arc<dyn RuntimeObserver>) {
        self.inner.hooks.install(observer);
    }

    /// Underlying registry
    pub fn registry(&self) -> &TypeRegistry {
        &self.inner.registry
    }

    /// Cycle detector
    pub fn detector(&self) -> &CircularDependencyDetector {
        &self.inner.detector
    }

    /// Usage counters
    pub fn optimizer(&self) -> &UsageOptimizer {
        &self.inner.optimizer
    }

    /// Hook table shared by every component
    pub fn hooks(&self) -> &HookTable {
        &self.inner.hooks
    }

    /// Configuration the container was built with
    pub fn config(&self) -> &RuntimeConfig {
        &self.inner.config
    }

    /// Drop every registration, graph edge, detected cycle and counter
    ///
    /// Observers stay installed.
    pub fn reset(&self) {
        self.inner.registry.clear();
        self.inner.detector.clear();
        self.inner.optimizer.reset();
        info!("Runtime reset");
    }
}

impl Default for WeaveContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WeaveContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeaveContainer")
            .field("registry", &self.inner.registry)
            .field("hooks", &self.inner.hooks)
            .field("stack_depth", &self.inner.detector.stack_depth())
            .finish_non_exhaustive()
    }
}

/// Build a runtime from `config`
///
/// Validates the configuration and composes every component. Logging is
/// not initialised here; call [`crate::logging::init_logging`] first if
/// wanted.
pub fn init_runtime(config: RuntimeConfig) -> Result<WeaveContainer> {
    info!("Initializing dependency runtime");
    let container = WeaveContainer::with_config(config)?;
    info!(
        detection = container.inner.detector.is_detection_enabled(),
        auto_edges = container.inner.detector.is_auto_recording(),
        optimizer = container.inner.optimizer.is_enabled(),
        reject_overrides = container.inner.config.registry.reject_overrides,
        "Runtime composed"
    );
    Ok(container)
}

/// Runtime with default configuration for tests
pub fn init_test_runtime() -> Result<WeaveContainer> {
    init_runtime(RuntimeConfig::default())
}
