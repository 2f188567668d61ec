//! Static dependency data for offline runs and tests.

use crate::error::Result;
use crate::fetcher::DependencyFetcher;
use async_trait::async_trait;
use std::collections::HashMap;

/// Names returned for packages the built-in table does not know.
const FALLBACK: [&str; 3] = ["offline-dep-a", "offline-dep-b", "offline-dep-c"];

/// Fetcher backed by an in-memory lookup table. Always succeeds.
///
/// The default table covers a handful of well-known packages plus a small
/// synthetic cluster (`A`, `B`, `C`) useful for exercising traversal
/// behavior. Unknown names resolve to a generic three-item fallback list,
/// so any root produces a non-trivial graph offline.
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    packages: HashMap<String, Vec<String>>,
    fallback: Option<Vec<String>>,
}

impl Default for StaticFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticFetcher {
    /// Create a fetcher with the built-in dependency table.
    #[must_use]
    pub fn new() -> Self {
        let entries: [(&str, &[&str]); 5] = [
            ("A", &["B", "C", "D"]),
            ("B", &["D", "E"]),
            ("C", &["B", "F"]),
            ("serde", &["serde_derive", "proc-macro2", "quote", "syn"]),
            ("tokio", &["bytes", "mio", "num_cpus", "pin-project-lite"]),
        ];

        let packages = entries
            .into_iter()
            .map(|(name, deps)| {
                (
                    name.to_string(),
                    deps.iter().map(|d| (*d).to_string()).collect(),
                )
            })
            .collect();

        Self {
            packages,
            fallback: Some(FALLBACK.iter().map(|d| (*d).to_string()).collect()),
        }
    }

    /// Create a fetcher with an explicit table and no fallback: unknown
    /// names resolve to an empty dependency list.
    #[must_use]
    pub fn with_packages(packages: HashMap<String, Vec<String>>) -> Self {
        Self {
            packages,
            fallback: None,
        }
    }
}

#[async_trait]
impl DependencyFetcher for StaticFetcher {
    async fn direct_dependencies(&self, package: &str) -> Result<Vec<String>> {
        if let Some(dependencies) = self.packages.get(package) {
            return Ok(dependencies.clone());
        }
        Ok(self.fallback.clone().unwrap_or_default())
    }
}
