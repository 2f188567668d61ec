//! Graph type definitions.
//!
//! This module defines `DependencyGraph`, the adjacency structure produced
//! by the builder and consumed by the cycle detector and the reporters.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// The dependency graph structure.
///
/// Wraps a petgraph directed graph whose node weights are package names.
/// Every discovered name is interned once and addressed by its stable
/// `NodeIndex`; a `HashMap` provides O(1) lookup by name.
///
/// A package is *recorded* once its dependency list has been fetched and
/// stored. Packages can exist as plain nodes without being recorded: they
/// were referenced as a dependency, but traversal into them was blocked
/// (depth limit) or failed (fetch error). Only recorded packages have an
/// adjacency list; `recorded` preserves their discovery order.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// The underlying petgraph directed graph
    inner: DiGraph<String, ()>,

    /// Index from package name to petgraph NodeIndex
    node_index: HashMap<String, NodeIndex>,

    /// Recorded packages in discovery order
    recorded: Vec<NodeIndex>,

    /// Recorded packages, for membership checks
    recorded_set: HashSet<NodeIndex>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a package name, returning its stable node id.
    fn intern(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(name) {
            return idx;
        }
        let idx = self.inner.add_node(name.to_string());
        self.node_index.insert(name.to_string(), idx);
        idx
    }

    /// Record a package's dependency list.
    ///
    /// Returns `false` without touching the graph if the package is
    /// already recorded; keys are unique and never overwritten.
    pub fn record(&mut self, package: &str, dependencies: &[String]) -> bool {
        let idx = self.intern(package);
        if self.recorded_set.contains(&idx) {
            tracing::debug!(package = %package, "Package already recorded, keeping first entry");
            return false;
        }

        self.recorded.push(idx);
        self.recorded_set.insert(idx);

        for dependency in dependencies {
            let dep_idx = self.intern(dependency);
            self.inner.add_edge(idx, dep_idx, ());
        }

        true
    }

    /// Whether the package has a recorded dependency list.
    #[must_use]
    pub fn is_recorded(&self, package: &str) -> bool {
        self.node_index
            .get(package)
            .is_some_and(|idx| self.recorded_set.contains(idx))
    }

    /// Whether the package appears anywhere in the graph, as a key or as
    /// a dependency reference.
    #[must_use]
    pub fn contains(&self, package: &str) -> bool {
        self.node_index.contains_key(package)
    }

    /// Recorded package names, in discovery order.
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.recorded.iter().map(|&idx| self.inner[idx].as_str())
    }

    /// A package's recorded dependency list, in fetch order.
    ///
    /// Returns `None` for packages that were never recorded.
    #[must_use]
    pub fn dependencies_of(&self, package: &str) -> Option<Vec<&str>> {
        let &idx = self.node_index.get(package)?;
        if !self.recorded_set.contains(&idx) {
            return None;
        }
        Some(
            self.dependency_ids(idx)
                .into_iter()
                .map(|dep| self.inner[dep].as_str())
                .collect(),
        )
    }

    /// Outgoing neighbor ids in recorded order.
    ///
    /// petgraph walks neighbors in reverse insertion order, so the
    /// collected list is reversed to restore it.
    pub(crate) fn dependency_ids(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut ids: Vec<NodeIndex> = self
            .inner
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        ids.reverse();
        ids
    }

    /// Recorded node ids in discovery order.
    pub(crate) fn recorded_ids(&self) -> &[NodeIndex] {
        &self.recorded
    }

    /// The package name behind a node id.
    pub(crate) fn name_of(&self, idx: NodeIndex) -> &str {
        self.inner[idx].as_str()
    }

    /// Number of recorded packages (graph keys).
    #[must_use]
    pub fn package_count(&self) -> usize {
        self.recorded.len()
    }

    /// Number of nodes, including dependency references that were never
    /// recorded.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of dependency edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Whether the graph has no recorded packages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recorded.is_empty()
    }

    /// Out-degree per recorded package, in discovery order.
    #[must_use]
    pub fn dependency_counts(&self) -> Vec<(&str, usize)> {
        self.recorded
            .iter()
            .map(|&idx| {
                (
                    self.inner[idx].as_str(),
                    self.inner.edges_directed(idx, Direction::Outgoing).count(),
                )
            })
            .collect()
    }

    /// The full adjacency listing, keys in discovery order.
    #[must_use]
    pub fn adjacency(&self) -> Vec<(&str, Vec<&str>)> {
        self.recorded
            .iter()
            .map(|&idx| {
                let deps = self
                    .dependency_ids(idx)
                    .into_iter()
                    .map(|dep| self.inner[dep].as_str())
                    .collect();
                (self.inner[idx].as_str(), deps)
            })
            .collect()
    }

    /// Get the underlying petgraph for advanced operations.
    #[must_use]
    pub fn inner(&self) -> &DiGraph<String, ()> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_record_preserves_order() {
        let mut graph = DependencyGraph::new();
        graph.record("a", &deps(&["c", "b", "d"]));

        assert_eq!(graph.dependencies_of("a"), Some(vec!["c", "b", "d"]));
        assert_eq!(graph.package_count(), 1);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let mut graph = DependencyGraph::new();
        assert!(graph.record("a", &deps(&["b"])));
        assert!(!graph.record("a", &deps(&["c"])));

        // The first entry wins
        assert_eq!(graph.dependencies_of("a"), Some(vec!["b"]));
        assert_eq!(graph.package_count(), 1);
    }

    #[test]
    fn test_reference_without_record() {
        let mut graph = DependencyGraph::new();
        graph.record("a", &deps(&["b"]));

        assert!(graph.contains("b"));
        assert!(!graph.is_recorded("b"));
        assert_eq!(graph.dependencies_of("b"), None);
    }

    #[test]
    fn test_discovery_order() {
        let mut graph = DependencyGraph::new();
        graph.record("root", &deps(&["x", "y"]));
        graph.record("x", &deps(&[]));
        graph.record("y", &deps(&["x"]));

        let keys: Vec<&str> = graph.packages().collect();
        assert_eq!(keys, vec!["root", "x", "y"]);
    }

    #[test]
    fn test_dependency_counts() {
        let mut graph = DependencyGraph::new();
        graph.record("a", &deps(&["b", "c"]));
        graph.record("b", &deps(&[]));

        assert_eq!(graph.dependency_counts(), vec![("a", 2), ("b", 0)]);
    }

    #[test]
    fn test_repeated_dependency_is_kept() {
        // A package listing the same dependency twice keeps both entries
        let mut graph = DependencyGraph::new();
        graph.record("a", &deps(&["b", "b"]));

        assert_eq!(graph.dependencies_of("a"), Some(vec!["b", "b"]));
        assert_eq!(graph.edge_count(), 2);
    }
}
