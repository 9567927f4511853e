//! Dependency Graph - typed nodes and labeled edges
//!
//! A plain directed graph with no locking of its own. It is owned by the
//! [`CircularDependencyDetector`](super::detector::CircularDependencyDetector),
//! which serializes every access.
//!
//! Nodes keep their insertion order. Traversals and cycle output follow that
//! order, so the same sequence of declarations always yields the same
//! report.
//!
//! All traversals are iterative; graph depth never touches the call stack.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use weave_domain::value_objects::{
    ChainAnalysis, CyclePath, DependencyEdge, GraphStatistics, TypeKey,
};

/// Directed graph of type keys
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    nodes: Vec<TypeKey>,
    index: HashMap<TypeKey, usize>,
    /// Distinct dependencies per node, in first-recorded order
    adjacency: Vec<Vec<usize>>,
    /// Distinct dependents per node
    reverse: Vec<Vec<usize>>,
    labels: HashMap<(usize, usize), BTreeSet<String>>,
}

impl DependencyGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add `key` if it is not yet known; returns its index
    pub fn add_node(&mut self, key: TypeKey) -> usize {
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(key);
        self.index.insert(key, idx);
        self.adjacency.push(Vec::new());
        self.reverse.push(Vec::new());
        idx
    }

    /// Record that `from` depends on `to`
    ///
    /// Returns `false` when the identical edge already existed.
    pub fn add_edge(&mut self, from: TypeKey, to: TypeKey, label: &str) -> bool {
        let from_idx = self.add_node(from);
        let to_idx = self.add_node(to);
        let labels = self.labels.entry((from_idx, to_idx)).or_default();
        if labels.is_empty() {
            self.adjacency[from_idx].push(to_idx);
            self.reverse[to_idx].push(from_idx);
        }
        labels.insert(label.to_string())
    }

    /// Remove every node and edge
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether `key` is a node
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.index.contains_key(key)
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> &[TypeKey] {
        &self.nodes
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges, each label counted once
    pub fn edge_count(&self) -> usize {
        self.labels.values().map(BTreeSet::len).sum()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct dependencies of `key`
    pub fn dependencies_of(&self, key: &TypeKey) -> Vec<TypeKey> {
        self.neighbours(&self.adjacency, key)
    }

    /// Types that depend directly on `key`
    pub fn dependents_of(&self, key: &TypeKey) -> Vec<TypeKey> {
        self.neighbours(&self.reverse, key)
    }

    /// Labels recorded between `from` and `to`
    pub fn labels_between(&self, from: &TypeKey, to: &TypeKey) -> Vec<String> {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&f), Some(&t)) => self
                .labels
                .get(&(f, t))
                .map(|set| set.iter().cloned().collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Every edge, grouped by source node in insertion order
    pub fn edges(&self) -> Vec<DependencyEdge> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (from_idx, targets) in self.adjacency.iter().enumerate() {
            for &to_idx in targets {
                if let Some(labels) = self.labels.get(&(from_idx, to_idx)) {
                    for label in labels {
                        edges.push(DependencyEdge::new(
                            self.nodes[from_idx],
                            self.nodes[to_idx],
                            label.clone(),
                        ));
                    }
                }
            }
        }
        edges
    }

    /// Whether `to` is reachable from `from` through at least one edge
    pub fn has_path(&self, from: &TypeKey, to: &TypeKey) -> bool {
        let (Some(&start), Some(&target)) = (self.index.get(from), self.index.get(to)) else {
            return false;
        };
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            for &next in &self.adjacency[node] {
                if next == target {
                    return true;
                }
                if !seen[next] {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }
        false
    }

    // ========================================================================
    // Analysis
    // ========================================================================

    /// Enumerate cycles with a depth-first search from every node
    ///
    /// Keeps a visited set, an on-path set and the current path. An edge to
    /// a node on the path closes a cycle, which is rotated to start at its
    /// earliest-inserted member and deduplicated by content. Runs in
    /// O(V + E).
    pub fn detect_cycles(&self) -> Vec<CyclePath> {
        let count = self.nodes.len();
        let mut visited = vec![false; count];
        let mut on_path = vec![false; count];
        let mut seen_cycles = HashSet::new();
        let mut cycles = Vec::new();

        for root in 0..count {
            if visited[root] {
                continue;
            }
            visited[root] = true;
            on_path[root] = true;
            let mut path = vec![root];
            // (node, position of the next neighbour to visit)
            let mut frames = vec![(root, 0usize)];

            while let Some(&(node, cursor)) = frames.last() {
                let Some(&next) = self.adjacency[node].get(cursor) else {
                    on_path[node] = false;
                    path.pop();
                    frames.pop();
                    continue;
                };
                if let Some(top) = frames.last_mut() {
                    top.1 += 1;
                }

                if on_path[next] {
                    if let Some(start) = path.iter().position(|&p| p == next) {
                        let chain = path[start..].iter().map(|&i| self.nodes[i]).collect();
                        let cycle = CyclePath::closing(chain).canonicalize_by(|k| self.rank(k));
                        if seen_cycles.insert(cycle.clone()) {
                            cycles.push(cycle);
                        }
                    }
                } else if !visited[next] {
                    visited[next] = true;
                    on_path[next] = true;
                    path.push(next);
                    frames.push((next, 0));
                }
            }
        }
        cycles
    }

    /// Breadth-first reachability report for `key`
    ///
    /// `known_cycles` decides `has_cycles`; pass the cycles recorded so far.
    pub fn analyze(&self, key: &TypeKey, known_cycles: &[CyclePath]) -> ChainAnalysis {
        let mut all_dependencies = Vec::new();
        let mut max_depth = 0;

        if let Some(&start) = self.index.get(key) {
            let mut seen = vec![false; self.nodes.len()];
            seen[start] = true;
            let mut queue = VecDeque::from([(start, 0usize)]);
            while let Some((node, depth)) = queue.pop_front() {
                max_depth = max_depth.max(depth);
                for &next in &self.adjacency[node] {
                    if !seen[next] {
                        seen[next] = true;
                        all_dependencies.push(self.nodes[next]);
                        queue.push_back((next, depth + 1));
                    }
                }
            }
        }

        ChainAnalysis {
            root: *key,
            direct_dependencies: self.dependencies_of(key),
            all_dependencies,
            max_depth,
            has_cycles: known_cycles.iter().any(|cycle| cycle.contains(key)),
        }
    }

    /// Order in which every dependency precedes its dependents (Kahn)
    ///
    /// Ties keep insertion order. Fails with a cycle when none exists.
    pub fn topological_order(&self) -> Result<Vec<TypeKey>, CyclePath> {
        let count = self.nodes.len();
        let mut pending: Vec<usize> = self.adjacency.iter().map(Vec::len).collect();
        let mut ready: VecDeque<usize> = (0..count).filter(|&i| pending[i] == 0).collect();
        let mut order = Vec::with_capacity(count);

        while let Some(node) = ready.pop_front() {
            order.push(self.nodes[node]);
            for &dependent in &self.reverse[node] {
                pending[dependent] -= 1;
                if pending[dependent] == 0 {
                    ready.push_back(dependent);
                }
            }
        }

        if order.len() == count {
            return Ok(order);
        }
        Err(self.detect_cycles().into_iter().next().unwrap_or_else(|| {
            let stuck = (0..count)
                .filter(|&i| pending[i] > 0)
                .map(|i| self.nodes[i])
                .collect();
            CyclePath::closing(stuck)
        }))
    }

    /// Aggregate metrics given the number of known cycles
    #[allow(clippy::cast_precision_loss)]
    pub fn statistics(&self, cycle_count: usize) -> GraphStatistics {
        let total_types = self.nodes.len();
        let fan_outs = self.adjacency.iter().map(Vec::len);
        let max_fan_out = fan_outs.clone().max().unwrap_or(0);
        let avg_fan_out = if total_types == 0 {
            0.0
        } else {
            fan_outs.sum::<usize>() as f64 / total_types as f64
        };
        let isolated_types = (0..total_types)
            .filter(|&i| self.adjacency[i].is_empty() && self.reverse[i].is_empty())
            .count();

        GraphStatistics {
            total_types,
            total_edges: self.edge_count(),
            avg_fan_out,
            max_fan_out,
            isolated_types,
            cycle_count,
            health_score: GraphStatistics::health_score_for(cycle_count, avg_fan_out),
        }
    }

    /// Insertion position of `key`; unknown keys sort last
    pub(crate) fn rank(&self, key: &TypeKey) -> usize {
        self.index.get(key).copied().unwrap_or(usize::MAX)
    }

    fn neighbours(&self, lists: &[Vec<usize>], key: &TypeKey) -> Vec<TypeKey> {
        self.index
            .get(key)
            .map(|&idx| lists[idx].iter().map(|&i| self.nodes[i]).collect())
            .unwrap_or_default()
    }
}
