//! # cratemap
//!
//! A transitive dependency graph inspector for crates.io packages.
//!
//! cratemap walks a package's transitive dependencies through the
//! crates.io API (or built-in offline data), assembles them into a
//! directed graph, detects dependency cycles, and reports statistics.
//!
//! ## Features
//!
//! - **Two fetcher variants**: a live registry client and a static
//!   offline table, selected from configuration
//! - **Bounded traversal**: depth limiting, name-substring filtering, and
//!   global memoization keep the walk finite and non-redundant
//! - **Cycle detection**: a separate depth-first pass enumerates every
//!   distinct dependency cycle in the finished graph
//! - **Multiple output formats**: plain text and JSON reports
//!
//! ## Example
//!
//! ```rust,no_run
//! use cratemap::{Config, Inspector, ReportFormat};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = Config::default();
//!     config.package = "serde".to_string();
//!     config.fetch.offline = true;
//!
//!     let inspector = Inspector::new(config.clone());
//!     let result = inspector.inspect().await?;
//!
//!     let report = result.generate_report(&config, ReportFormat::Text)?;
//!     println!("{report}");
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all, missing_docs, rust_2018_idioms)]

pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod graph;
pub mod reporter;
pub mod types;

// Re-export commonly used types at crate root
pub use config::Config;
pub use error::{CratemapError, Result};
pub use graph::{Cycle, DependencyGraph};
pub use types::{InspectionResult, ReportFormat};

/// Main orchestrator coordinating one inspection.
///
/// The `Inspector` is the primary entry point for using cratemap as a
/// library. It validates the configuration, selects the fetcher variant,
/// builds the dependency graph, and runs cycle detection, in that order.
/// That sequence is the contract the reporters rely on.
///
/// # Example
///
/// ```rust,no_run
/// use cratemap::{Config, Inspector};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let mut config = Config::default();
///     config.package = "tokio".to_string();
///     config.fetch.offline = true;
///
///     let result = Inspector::new(config).inspect().await?;
///     println!("{} packages discovered", result.graph.package_count());
///     Ok(())
/// }
/// ```
pub struct Inspector {
    config: Config,
}

impl Inspector {
    /// Create a new inspector with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration this inspector runs with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the dependency graph for the configured root package and
    /// detect cycles in it.
    ///
    /// # Errors
    ///
    /// Returns a config-family error if the configuration is invalid.
    /// Fetch failures during the traversal do not abort the inspection;
    /// they leave the affected packages out of the graph.
    pub async fn inspect(&self) -> Result<InspectionResult> {
        self.config.validate()?;

        let fetcher = fetcher::for_config(&self.config.fetch);
        let graph = graph::GraphBuilder::new()
            .build(
                fetcher.as_ref(),
                &self.config.package,
                &self.config.traversal,
            )
            .await;
        let cycles = graph::CycleDetector::new().detect(&graph);

        Ok(InspectionResult {
            root: self.config.package.clone(),
            graph,
            cycles,
        })
    }

    /// Fetch the direct dependencies of a single package, without any
    /// traversal.
    ///
    /// # Errors
    ///
    /// Returns a fetch-family error when the configured source cannot
    /// answer for this package.
    pub async fn direct_dependencies(&self, package: &str) -> Result<Vec<String>> {
        let fetcher = fetcher::for_config(&self.config.fetch);
        fetcher.direct_dependencies(package).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_inspect_rejects_missing_package() {
        let inspector = Inspector::new(Config::default());
        let err = inspector.inspect().await.unwrap_err();
        assert!(matches!(err, CratemapError::ConfigMissing { .. }));
    }

    #[tokio::test]
    async fn test_inspect_offline() {
        let mut config = Config::default();
        config.package = "serde".to_string();
        config.fetch.offline = true;
        config.traversal.max_depth = 1;

        let result = Inspector::new(config).inspect().await.unwrap();
        assert_eq!(result.root, "serde");
        assert_eq!(
            result.graph.dependencies_of("serde"),
            Some(vec!["serde_derive", "proc-macro2", "quote", "syn"])
        );
    }
}
