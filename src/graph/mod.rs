//! Dependency graph construction and analysis.
//!
//! This module implements the core of cratemap: building a directed
//! dependency graph by walking a package's transitive dependencies, and
//! enumerating the cycles in the result.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────────┐
//! │   Fetcher   │────▶│ GraphBuilder │────▶│ DependencyGraph │
//! │ (registry / │     │  (worklist   │     │  (petgraph +    │
//! │  fixtures)  │     │   DFS)       │     │   name index)   │
//! └─────────────┘     └──────────────┘     └─────────────────┘
//!                                                   │
//!                                   ┌───────────────┼───────────────┐
//!                                   ▼               ▼               ▼
//!                            ┌─────────────┐ ┌─────────────┐ ┌─────────────┐
//!                            │CycleDetector│ │  Reporter   │ │  Derived    │
//!                            │ (post-hoc   │ │ (text/json) │ │  queries    │
//!                            │  DFS)       │ │             │ │ (out-degree)│
//!                            └─────────────┘ └─────────────┘ └─────────────┘
//! ```
//!
//! # Traversal
//!
//! [`GraphBuilder`] performs a depth-first, depth-bounded walk from a root
//! package. Three stop conditions keep it finite and non-redundant: a
//! configurable depth limit, an on-path cycle guard, and global
//! memoization (a package is expanded at most once per build, however many
//! paths reach it). A substring filter drops unwanted dependency names
//! before they are recorded or traversed. Fetch failures are confined to
//! the node that failed.
//!
//! The walk uses an explicit Enter/Exit worklist instead of call-stack
//! recursion, so arbitrarily deep dependency chains cannot exhaust the
//! stack. Node identity is interned: every package name maps to a stable
//! petgraph `NodeIndex`, and adjacency is kept on the graph itself.
//!
//! # Cycle detection
//!
//! [`CycleDetector`] runs a second, independent depth-first search over
//! the finished graph and reports every distinct cycle. The builder's
//! in-line guard and the detector deliberately do not share state: the
//! guard exists to terminate construction, the detector to explain the
//! graph afterwards.
//!
//! # Example
//!
//! ```rust,no_run
//! use cratemap::fetcher::StaticFetcher;
//! use cratemap::graph::{CycleDetector, GraphBuilder, TraversalOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let fetcher = StaticFetcher::new();
//!     let graph = GraphBuilder::new()
//!         .build(&fetcher, "serde", &TraversalOptions::default())
//!         .await;
//!
//!     for cycle in CycleDetector::new().detect(&graph) {
//!         println!("cycle: {cycle}");
//!     }
//! }
//! ```

mod builder;
mod cycles;
mod types;

pub use builder::{GraphBuilder, TraversalOptions};
pub use cycles::{Cycle, CycleDetector};
pub use types::DependencyGraph;
