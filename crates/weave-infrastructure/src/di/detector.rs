//! Circular Dependency Detector
//!
//! Two mechanisms share one serialized state:
//!
//! - **Live guard**: a resolution stack pushed/popped around every resolve.
//!   Entering a key that is already on the stack fails with
//!   `CircularDependencyDetected` and does not push it again.
//! - **Static scan**: a [`DependencyGraph`] of declared (and optionally
//!   auto-recorded) edges, scanned on demand.
//!
//! Stack and graph live behind one `parking_lot::Mutex`; nothing else in the
//! crate can reach them. The critical sections never call out to user code.
//!
//! The stack is per detector, not per call chain. Two unrelated chains
//! resolving the same type at the same moment share it and the second one
//! is reported as a cycle.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};
use weave_domain::constants::{AUTO_EDGE_LABEL, DEFAULT_EDGE_LABEL};
use weave_domain::error::{Error, Result};
use weave_domain::value_objects::{
    ChainAnalysis, CyclePath, GraphSnapshot, GraphStatistics, TypeKey,
};

use super::graph::DependencyGraph;
use crate::config::DetectorConfig;

#[derive(Debug)]
struct DetectorState {
    stack: Vec<TypeKey>,
    graph: DependencyGraph,
    /// Every cycle seen so far, live or static, in discovery order
    detected: Vec<CyclePath>,
    detected_set: HashSet<CyclePath>,
    detection_enabled: bool,
    auto_record_edges: bool,
    max_depth: usize,
}

impl DetectorState {
    /// Record `cycle` once, whatever node it was entered from
    fn remember(&mut self, cycle: CyclePath) -> bool {
        let cycle = cycle.canonicalize_by(|k| self.graph.rank(k));
        if self.detected_set.insert(cycle.clone()) {
            self.detected.push(cycle);
            true
        } else {
            false
        }
    }

    /// Detected cycles plus a fresh scan of the graph
    fn all_cycles(&mut self) -> Vec<CyclePath> {
        let scanned = self.graph.detect_cycles();
        for cycle in &scanned {
            self.remember(cycle.clone());
        }
        self.detected.clone()
    }
}

/// Live and static cycle detection over one shared state
#[derive(Debug)]
pub struct CircularDependencyDetector {
    state: Mutex<DetectorState>,
}

impl CircularDependencyDetector {
    /// Create a detector from its configuration section
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            state: Mutex::new(DetectorState {
                stack: Vec::new(),
                graph: DependencyGraph::new(),
                detected: Vec::new(),
                detected_set: HashSet::new(),
                detection_enabled: config.detection_enabled,
                auto_record_edges: config.auto_record_edges,
                max_depth: config.max_resolution_depth,
            }),
        }
    }

    // ========================================================================
    // Live guard
    // ========================================================================

    /// Push `key` onto the resolution stack
    ///
    /// # Errors
    ///
    /// - `CircularDependencyDetected` when `key` is already being resolved;
    ///   the path runs from its first occurrence to the top of the stack and
    ///   closes on `key`. Nothing is pushed.
    /// - `ResolutionDepthExceeded` when the stack is already at the limit.
    pub fn begin_resolution(&self, key: TypeKey) -> Result<()> {
        let mut state = self.state.lock();

        let cycle = if state.detection_enabled {
            CyclePath::from_stack(&state.stack, key)
        } else {
            None
        };
        if let Some(path) = cycle {
            let first_seen = state.remember(path.clone());
            drop(state);
            warn!(cycle = %path, first_seen, "Circular dependency detected during resolution");
            return Err(Error::circular(path));
        }

        let depth = state.stack.len();
        if depth >= state.max_depth {
            let limit = state.max_depth;
            drop(state);
            warn!(type_name = %key, depth, limit, "Resolution depth limit reached");
            return Err(Error::ResolutionDepthExceeded {
                type_name: key.name().to_string(),
                depth,
                limit,
            });
        }

        state.stack.push(key);
        Ok(())
    }

    /// Remove the last stack entry equal to `key`
    ///
    /// Tolerates out-of-order ends from interleaved chains. Ending a key
    /// that is not on the stack does nothing.
    pub fn end_resolution(&self, key: &TypeKey) {
        let mut state = self.state.lock();
        if let Some(pos) = state.stack.iter().rposition(|k| k == key) {
            state.stack.remove(pos);
        } else {
            drop(state);
            debug!(type_name = %key, "end_resolution for a key that is not on the stack");
        }
    }

    /// [`Self::begin_resolution`] returning a guard that ends it on drop
    pub fn enter(&self, key: TypeKey) -> Result<ResolutionGuard<'_>> {
        self.begin_resolution(key)?;
        Ok(ResolutionGuard {
            detector: self,
            key,
        })
    }

    /// Current depth of the resolution stack
    pub fn stack_depth(&self) -> usize {
        self.state.lock().stack.len()
    }

    /// Copy of the resolution stack, bottom first
    pub fn current_stack(&self) -> Vec<TypeKey> {
        self.state.lock().stack.clone()
    }

    // ========================================================================
    // Edge recording
    // ========================================================================

    /// Declare that `from` depends on `to`
    pub fn record_dependency(&self, from: TypeKey, to: TypeKey) -> bool {
        self.record_labeled_dependency(from, to, DEFAULT_EDGE_LABEL)
    }

    /// Declare a labeled edge; returns `false` if it already existed
    pub fn record_labeled_dependency(&self, from: TypeKey, to: TypeKey, label: &str) -> bool {
        let added = self.state.lock().graph.add_edge(from, to, label);
        if added {
            debug!(from = %from, to = %to, label, "Recorded dependency edge");
        }
        added
    }

    /// Add `top-of-stack -> target` when auto recording is on
    ///
    /// Does nothing when the stack is empty, when auto recording is off, or
    /// when `target` is already the top of the stack.
    pub fn record_auto_edge_if_enabled(&self, target: TypeKey) -> bool {
        let mut state = self.state.lock();
        if !state.auto_record_edges {
            return false;
        }
        let Some(&from) = state.stack.last() else {
            return false;
        };
        if from == target {
            return false;
        }
        state.graph.add_edge(from, target, AUTO_EDGE_LABEL)
    }

    /// Add `key` as a node without edges
    pub fn record_type(&self, key: TypeKey) {
        self.state.lock().graph.add_node(key);
    }

    // ========================================================================
    // Static analysis
    // ========================================================================

    /// Scan the whole graph for cycles
    ///
    /// Repeated calls on an unchanged graph return the same paths in the
    /// same order. Every cycle found is also remembered for
    /// [`Self::analyze_dependency_chain`].
    pub fn detect_all_circular_dependencies(&self) -> Vec<CyclePath> {
        let mut state = self.state.lock();
        let cycles = state.graph.detect_cycles();
        for cycle in &cycles {
            state.remember(cycle.clone());
        }
        drop(state);
        if !cycles.is_empty() {
            warn!(count = cycles.len(), "Static scan found dependency cycles");
        }
        cycles
    }

    /// Every cycle seen so far, live and static, in discovery order
    pub fn detected_cycles(&self) -> Vec<CyclePath> {
        self.state.lock().detected.clone()
    }

    /// Reachability report for `key`
    ///
    /// `has_cycles` reflects cycles already detected, live or static.
    pub fn analyze_dependency_chain(&self, key: &TypeKey) -> ChainAnalysis {
        let state = self.state.lock();
        state.graph.analyze(key, &state.detected)
    }

    /// Graph metrics; counts detected cycles plus any a fresh scan finds
    pub fn graph_statistics(&self) -> GraphStatistics {
        let mut state = self.state.lock();
        let cycle_count = state.all_cycles().len();
        state.graph.statistics(cycle_count)
    }

    /// Order in which dependencies come before their dependents
    ///
    /// # Errors
    ///
    /// `CircularDependencyDetected` with one offending cycle.
    pub fn initialization_order(&self) -> Result<Vec<TypeKey>> {
        let state = self.state.lock();
        state.graph.topological_order().map_err(Error::circular)
    }

    /// Direct dependencies of `key`
    pub fn dependencies_of(&self, key: &TypeKey) -> Vec<TypeKey> {
        self.state.lock().graph.dependencies_of(key)
    }

    /// Types that depend directly on `key`
    pub fn dependents_of(&self, key: &TypeKey) -> Vec<TypeKey> {
        self.state.lock().graph.dependents_of(key)
    }

    /// Whether `to` is reachable from `from`
    pub fn has_path(&self, from: &TypeKey, to: &TypeKey) -> bool {
        self.state.lock().graph.has_path(from, to)
    }

    /// Consistent copy of nodes, edges and cycles
    ///
    /// Waits at most `timeout` for the detector.
    ///
    /// # Errors
    ///
    /// `BridgeTimeout` if the state stays locked for longer than `timeout`.
    pub fn snapshot(&self, timeout: Duration) -> Result<GraphSnapshot> {
        let Some(mut state) = self.state.try_lock_for(timeout) else {
            let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            warn!(timeout_ms, "Detector busy, graph snapshot abandoned");
            return Err(Error::bridge_timeout("graph snapshot", timeout_ms));
        };
        let cycles = state.all_cycles();
        Ok(GraphSnapshot {
            nodes: state.graph.nodes().to_vec(),
            edges: state.graph.edges(),
            cycles,
        })
    }

    // ========================================================================
    // Switches and reset
    // ========================================================================

    /// Turn live cycle reporting on or off; the depth limit always applies
    pub fn set_detection_enabled(&self, enabled: bool) {
        self.state.lock().detection_enabled = enabled;
        debug!(enabled, "Live cycle detection toggled");
    }

    /// Whether live cycle reporting is on
    pub fn is_detection_enabled(&self) -> bool {
        self.state.lock().detection_enabled
    }

    /// Turn automatic edge recording on or off
    pub fn set_auto_record_edges(&self, enabled: bool) {
        self.state.lock().auto_record_edges = enabled;
    }

    /// Whether automatic edge recording is on
    pub fn is_auto_recording(&self) -> bool {
        self.state.lock().auto_record_edges
    }

    /// Forget the graph and every detected cycle
    ///
    /// The stack is left alone so in-flight resolutions still pop cleanly.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.graph.clear();
        state.detected.clear();
        state.detected_set.clear();
    }

    #[cfg(test)]
    fn lock_for_test(&self) -> parking_lot::MutexGuard<'_, DetectorState> {
        self.state.lock()
    }
}

impl Default for CircularDependencyDetector {
    fn default() -> Self {
        Self::new(&DetectorConfig::default())
    }
}

/// Ends a resolution when dropped, including during unwinding
#[must_use = "dropping the guard immediately ends the resolution"]
#[derive(Debug)]
pub struct ResolutionGuard<'a> {
    detector: &'a CircularDependencyDetector,
    key: TypeKey,
}

impl ResolutionGuard<'_> {
    /// Key this guard is resolving
    pub fn key(&self) -> TypeKey {
        self.key
    }
}

impl Drop for ResolutionGuard<'_> {
    fn drop(&mut self) {
        self.detector.end_resolution(&self.key);
    }
}
