//! Graph builder implementation.
//!
//! This module provides the `GraphBuilder`, which walks a package's
//! transitive dependencies through a [`DependencyFetcher`] and populates a
//! [`DependencyGraph`].

use crate::fetcher::DependencyFetcher;
use crate::graph::types::DependencyGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Options bounding a single traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalOptions {
    /// Maximum traversal depth; `-1` means unlimited, otherwise the number
    /// of hops from the root beyond which packages are not expanded.
    pub max_depth: i64,

    /// Dependencies whose name contains this substring are dropped before
    /// recording and never traversed into. Empty means no filtering. The
    /// root package itself is never filtered.
    pub filter: String,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::UNLIMITED,
            filter: String::new(),
        }
    }
}

impl TraversalOptions {
    /// Sentinel depth meaning "no limit".
    pub const UNLIMITED: i64 = -1;

    fn depth_exceeded(&self, depth: i64) -> bool {
        self.max_depth != Self::UNLIMITED && depth > self.max_depth
    }

    fn excludes(&self, name: &str) -> bool {
        !self.filter.is_empty() && name.contains(&self.filter)
    }
}

/// One unit of pending traversal work.
///
/// `Enter` expands a package; `Exit` runs after the package's whole
/// subtree has been processed and removes it from the active path. Pushing
/// `Exit` beneath a package's children reproduces the enter/leave pairing
/// of a recursive descent without consuming call stack.
enum Frame {
    Enter { package: String, depth: i64 },
    Exit { package: String },
}

/// Traversal state owned by a single `build` call.
struct TraversalState {
    graph: DependencyGraph,
    /// Packages ever expanded during this build (global memoization)
    visited: HashSet<String>,
    /// Packages on the active traversal path (cycle guard)
    on_stack: HashSet<String>,
}

impl TraversalState {
    fn new() -> Self {
        Self {
            graph: DependencyGraph::new(),
            visited: HashSet::new(),
            on_stack: HashSet::new(),
        }
    }
}

/// Builder for dependency graphs.
///
/// The builder holds no state of its own; everything a traversal touches
/// lives in a per-call `TraversalState`, so one builder can safely run
/// any number of independent builds.
///
/// # Traversal semantics
///
/// Packages are expanded depth-first in dependency-list order. Expansion
/// of a package stops without recording anything when:
/// - its depth exceeds `max_depth`,
/// - it is already on the active path (a dependency cycle, logged and
///   skipped; the separate [`CycleDetector`](crate::graph::CycleDetector)
///   enumerates cycles after the fact), or
/// - it was already expanded anywhere else in this build.
///
/// A fetch failure is isolated to its node: the error is logged, the
/// package gets no adjacency entry, and the traversal continues with the
/// remaining branches.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    /// Create a new graph builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build the transitive dependency graph rooted at `root`.
    ///
    /// Never fails: fetch errors only leave the affected packages out of
    /// the result, so the returned graph may be partial.
    pub async fn build(
        &self,
        fetcher: &dyn DependencyFetcher,
        root: &str,
        options: &TraversalOptions,
    ) -> DependencyGraph {
        tracing::info!(
            root = %root,
            max_depth = options.max_depth,
            filter = %options.filter,
            "Building dependency graph"
        );

        let mut state = TraversalState::new();
        let mut work = vec![Frame::Enter {
            package: root.to_string(),
            depth: 0,
        }];

        while let Some(frame) = work.pop() {
            match frame {
                Frame::Exit { package } => {
                    state.on_stack.remove(&package);
                }
                Frame::Enter { package, depth } => {
                    self.expand(fetcher, options, &mut state, &mut work, package, depth)
                        .await;
                }
            }
        }

        tracing::info!(
            packages = state.graph.package_count(),
            edges = state.graph.edge_count(),
            "Dependency graph built"
        );

        state.graph
    }

    /// Expand a single package: apply the stop conditions, fetch its
    /// dependency list, record it, and queue its children.
    async fn expand(
        &self,
        fetcher: &dyn DependencyFetcher,
        options: &TraversalOptions,
        state: &mut TraversalState,
        work: &mut Vec<Frame>,
        package: String,
        depth: i64,
    ) {
        if options.depth_exceeded(depth) {
            tracing::debug!(package = %package, depth, "Depth limit reached, not expanding");
            return;
        }

        if state.on_stack.contains(&package) {
            tracing::warn!(package = %package, "Dependency cycle hit on active path");
            return;
        }

        if state.visited.contains(&package) {
            // Already expanded via another path in this build
            return;
        }

        state.visited.insert(package.clone());
        state.on_stack.insert(package.clone());
        // The Exit frame sits beneath the children pushed below, so the
        // package stays on the active path for exactly its own subtree.
        work.push(Frame::Exit {
            package: package.clone(),
        });

        let dependencies = match fetcher.direct_dependencies(&package).await {
            Ok(dependencies) => dependencies,
            Err(e) => {
                tracing::warn!(
                    package = %package,
                    error = %e,
                    "Failed to fetch dependencies, omitting package from graph"
                );
                return;
            }
        };

        let mut kept = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            if options.excludes(&dependency) {
                tracing::debug!(
                    package = %package,
                    dependency = %dependency,
                    "Dependency filtered out"
                );
                continue;
            }
            kept.push(dependency);
        }

        state.graph.record(&package, &kept);

        // Reversed so the worklist pops children in dependency-list order
        for dependency in kept.into_iter().rev() {
            work.push(Frame::Enter {
                package: dependency,
                depth: depth + 1,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CratemapError, Result};
    use crate::fetcher::StaticFetcher;
    use async_trait::async_trait;
    use std::collections::HashMap;

    fn table(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(name, deps)| {
                (
                    (*name).to_string(),
                    deps.iter().map(|d| (*d).to_string()).collect(),
                )
            })
            .collect()
    }

    /// Fetcher that fails for selected packages.
    struct FailingFetcher {
        inner: StaticFetcher,
        failing: Vec<String>,
    }

    #[async_trait]
    impl crate::fetcher::DependencyFetcher for FailingFetcher {
        async fn direct_dependencies(&self, package: &str) -> Result<Vec<String>> {
            if self.failing.iter().any(|p| p == package) {
                return Err(CratemapError::PackageNotFound {
                    package: package.to_string(),
                });
            }
            self.inner.direct_dependencies(package).await
        }
    }

    #[tokio::test]
    async fn test_acyclic_graph_fully_expanded() {
        let fetcher = StaticFetcher::with_packages(table(&[
            ("root", &["left", "right"]),
            ("left", &["leaf"]),
            ("right", &["leaf"]),
            ("leaf", &[]),
        ]));
        let graph = GraphBuilder::new()
            .build(&fetcher, "root", &TraversalOptions::default())
            .await;

        assert_eq!(graph.package_count(), 4);
        assert_eq!(graph.dependencies_of("root"), Some(vec!["left", "right"]));
        assert_eq!(graph.dependencies_of("left"), Some(vec!["leaf"]));
        assert_eq!(graph.dependencies_of("leaf"), Some(vec![]));
    }

    #[tokio::test]
    async fn test_depth_zero_records_only_root() {
        let fetcher = StaticFetcher::with_packages(table(&[
            ("a", &["b", "c"]),
            ("b", &["d"]),
            ("c", &[]),
        ]));
        let options = TraversalOptions {
            max_depth: 0,
            ..TraversalOptions::default()
        };
        let graph = GraphBuilder::new().build(&fetcher, "a", &options).await;

        // Root is recorded with its full list; children are referenced
        // but never expanded
        assert_eq!(graph.package_count(), 1);
        assert_eq!(graph.dependencies_of("a"), Some(vec!["b", "c"]));
        assert!(graph.contains("b"));
        assert!(!graph.is_recorded("b"));
        assert_eq!(graph.dependencies_of("c"), None);
    }

    #[tokio::test]
    async fn test_depth_one_expands_direct_dependencies() {
        let fetcher = StaticFetcher::with_packages(table(&[
            ("a", &["b"]),
            ("b", &["c"]),
            ("c", &["d"]),
        ]));
        let options = TraversalOptions {
            max_depth: 1,
            ..TraversalOptions::default()
        };
        let graph = GraphBuilder::new().build(&fetcher, "a", &options).await;

        assert!(graph.is_recorded("a"));
        assert!(graph.is_recorded("b"));
        assert!(!graph.is_recorded("c"));
    }

    #[tokio::test]
    async fn test_filter_drops_matching_dependencies() {
        let fetcher = StaticFetcher::with_packages(table(&[
            ("app", &["serde", "serde_test", "tokio"]),
            ("serde", &[]),
            ("tokio", &[]),
        ]));
        let options = TraversalOptions {
            filter: "test".to_string(),
            ..TraversalOptions::default()
        };
        let graph = GraphBuilder::new().build(&fetcher, "app", &options).await;

        assert_eq!(graph.dependencies_of("app"), Some(vec!["serde", "tokio"]));
        // The dropped name is neither a value nor a node
        assert!(!graph.contains("serde_test"));
    }

    #[tokio::test]
    async fn test_filter_never_applies_to_root() {
        let fetcher =
            StaticFetcher::with_packages(table(&[("serde_test", &["serde"]), ("serde", &[])]));
        let options = TraversalOptions {
            filter: "test".to_string(),
            ..TraversalOptions::default()
        };
        let graph = GraphBuilder::new()
            .build(&fetcher, "serde_test", &options)
            .await;

        // Root matches the filter substring but is still processed in full
        assert_eq!(graph.dependencies_of("serde_test"), Some(vec!["serde"]));
    }

    #[tokio::test]
    async fn test_cycle_guard_terminates_traversal() {
        let fetcher = StaticFetcher::with_packages(table(&[("a", &["b"]), ("b", &["a"])]));
        let graph = GraphBuilder::new()
            .build(&fetcher, "a", &TraversalOptions::default())
            .await;

        // Both sides of the cycle are recorded once; the back edge is kept
        // in the adjacency but not traversed
        assert_eq!(graph.dependencies_of("a"), Some(vec!["b"]));
        assert_eq!(graph.dependencies_of("b"), Some(vec!["a"]));
        assert_eq!(graph.package_count(), 2);
    }

    #[tokio::test]
    async fn test_self_dependency_is_guarded() {
        let fetcher = StaticFetcher::with_packages(table(&[("a", &["a", "b"]), ("b", &[])]));
        let graph = GraphBuilder::new()
            .build(&fetcher, "a", &TraversalOptions::default())
            .await;

        assert_eq!(graph.dependencies_of("a"), Some(vec!["a", "b"]));
        assert_eq!(graph.package_count(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_isolated() {
        let fetcher = FailingFetcher {
            inner: StaticFetcher::with_packages(table(&[
                ("root", &["broken", "ok"]),
                ("ok", &["leaf"]),
                ("leaf", &[]),
            ])),
            failing: vec!["broken".to_string()],
        };
        let graph = GraphBuilder::new()
            .build(&fetcher, "root", &TraversalOptions::default())
            .await;

        // The failing node has no entry; its siblings are unaffected
        assert_eq!(graph.dependencies_of("broken"), None);
        assert!(graph.contains("broken"));
        assert_eq!(graph.dependencies_of("ok"), Some(vec!["leaf"]));
        assert_eq!(graph.package_count(), 3);
    }

    #[tokio::test]
    async fn test_diamond_is_expanded_once() {
        let fetcher = StaticFetcher::with_packages(table(&[
            ("top", &["left", "right"]),
            ("left", &["shared"]),
            ("right", &["shared"]),
            ("shared", &["leaf"]),
            ("leaf", &[]),
        ]));
        let graph = GraphBuilder::new()
            .build(&fetcher, "top", &TraversalOptions::default())
            .await;

        // "shared" is reachable via two paths but has exactly one entry
        assert_eq!(graph.package_count(), 5);
        assert_eq!(graph.dependencies_of("shared"), Some(vec!["leaf"]));
    }

    #[tokio::test]
    async fn test_memoization_skips_shallower_revisit() {
        // "shared" is first reached at depth 2 where its children exceed
        // the limit, and later at depth 1; the first encounter wins and it
        // is not re-expanded
        let fetcher = StaticFetcher::with_packages(table(&[
            ("root", &["deep", "shared"]),
            ("deep", &["shared"]),
            ("shared", &["tail"]),
            ("tail", &[]),
        ]));
        let options = TraversalOptions {
            max_depth: 2,
            ..TraversalOptions::default()
        };
        let graph = GraphBuilder::new().build(&fetcher, "root", &options).await;

        assert_eq!(graph.dependencies_of("shared"), Some(vec!["tail"]));
        // "tail" sat beyond the limit when "shared" was expanded
        assert!(!graph.is_recorded("tail"));
    }
}
