//! Cycle enumeration over a finished dependency graph.
//!
//! The builder's in-line cycle guard only keeps the traversal from
//! looping; this module runs afterwards and enumerates every cycle for
//! diagnostics.

use crate::graph::types::DependencyGraph;
use petgraph::graph::NodeIndex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// A dependency cycle: an ordered path of package names whose last member
/// depends back on the first.
///
/// Paths are canonicalized on construction by rotating the
/// lexicographically smallest member to the front, so two discoveries of
/// the same loop compare equal regardless of where the search entered it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cycle {
    path: Vec<String>,
}

impl Cycle {
    fn new(mut path: Vec<String>) -> Self {
        if let Some((start, _)) = path.iter().enumerate().min_by(|a, b| a.1.cmp(b.1)) {
            path.rotate_left(start);
        }
        Self { path }
    }

    /// The members of the cycle, starting at its canonical head.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.path
    }

    /// Number of packages on the cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the cycle has no members. Never true for detector output.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.path {
            write!(f, "{name} -> ")?;
        }
        // Close the loop back to the head
        match self.path.first() {
            Some(head) => write!(f, "{head}"),
            None => Ok(()),
        }
    }
}

/// Depth-first cycle detector.
///
/// Operates on an already-built [`DependencyGraph`] with its own fresh
/// visited/recursion-stack state, independent of whatever the builder did.
/// Detection is a pure function of the graph and raises no errors; an
/// empty result means the graph is acyclic.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleDetector;

impl CycleDetector {
    /// Create a new cycle detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Enumerate all cycles reachable from the graph's recorded packages.
    ///
    /// Nodes are searched in recorded (discovery) order and children in
    /// adjacency order, so emission order is deterministic for a given
    /// graph.
    #[must_use]
    pub fn detect(&self, graph: &DependencyGraph) -> Vec<Cycle> {
        let mut search = CycleSearch {
            graph,
            visited: HashSet::new(),
            on_stack: HashSet::new(),
            path: Vec::new(),
            seen: HashSet::new(),
            cycles: Vec::new(),
        };

        for &start in graph.recorded_ids() {
            if !search.visited.contains(&start) {
                search.dfs(start);
            }
        }

        tracing::debug!(cycles = search.cycles.len(), "Cycle detection finished");
        search.cycles
    }
}

/// Working state of one detection run.
struct CycleSearch<'a> {
    graph: &'a DependencyGraph,
    visited: HashSet<NodeIndex>,
    on_stack: HashSet<NodeIndex>,
    path: Vec<NodeIndex>,
    seen: HashSet<Vec<String>>,
    cycles: Vec<Cycle>,
}

impl CycleSearch<'_> {
    fn dfs(&mut self, node: NodeIndex) {
        if self.on_stack.contains(&node) {
            // The current path loops back to `node`; the suffix from its
            // first occurrence is the cycle
            if let Some(start) = self.path.iter().position(|&n| n == node) {
                let members: Vec<String> = self.path[start..]
                    .iter()
                    .map(|&n| self.graph.name_of(n).to_string())
                    .collect();
                let cycle = Cycle::new(members);
                if self.seen.insert(cycle.members().to_vec()) {
                    tracing::debug!(cycle = %cycle, "Cycle detected");
                    self.cycles.push(cycle);
                }
            }
            return;
        }

        if self.visited.contains(&node) {
            // Fully explored elsewhere; nothing new on this branch
            return;
        }

        self.visited.insert(node);
        self.on_stack.insert(node);
        self.path.push(node);

        for next in self.graph.dependency_ids(node) {
            self.dfs(next);
        }

        self.on_stack.remove(&node);
        self.path.pop();
    }
}
