//! Dependency fetchers.
//!
//! A fetcher answers one question: which packages does a given package
//! directly depend on, in declaration order. Two variants exist, chosen
//! explicitly at construction time from configuration:
//!
//! - [`RegistryFetcher`]: queries a crates.io-style registry API over HTTP
//! - [`StaticFetcher`]: serves a built-in lookup table, for offline use
//!   and tests
//!
//! The traversal in [`crate::graph::GraphBuilder`] only ever sees the
//! [`DependencyFetcher`] trait.

mod fixture;
mod registry;

pub use fixture::StaticFetcher;
pub use registry::RegistryFetcher;

use crate::config::FetchOptions;
use crate::error::Result;
use async_trait::async_trait;

/// Source of direct-dependency information.
#[async_trait]
pub trait DependencyFetcher: Send + Sync {
    /// The names of the packages `package` directly depends on, in
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns a fetch-family error (`Http`, `Timeout`, `PackageNotFound`,
    /// `ResponseFormat`) when the source cannot answer. Callers inside a
    /// traversal treat these as recoverable.
    async fn direct_dependencies(&self, package: &str) -> Result<Vec<String>>;
}

/// Construct the fetcher variant selected by the configuration.
#[must_use]
pub fn for_config(options: &FetchOptions) -> Box<dyn DependencyFetcher> {
    if options.offline {
        tracing::debug!("Using static dependency data (offline mode)");
        Box::new(StaticFetcher::new())
    } else {
        tracing::debug!(registry_url = %options.registry_url, "Using registry fetcher");
        Box::new(RegistryFetcher::new(options))
    }
}
