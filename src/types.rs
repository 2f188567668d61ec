//! Core data types shared across cratemap.

use crate::config::Config;
use crate::graph::{Cycle, DependencyGraph};
use serde::{Deserialize, Serialize};

/// Available report output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable CLI output
    #[default]
    Text,
    /// Machine-readable structured output
    Json,
}

/// The outcome of one inspection: the built graph plus the cycles found
/// in it.
#[derive(Debug, Clone)]
pub struct InspectionResult {
    /// The root package the traversal started from
    pub root: String,

    /// The (possibly partial) transitive dependency graph
    pub graph: DependencyGraph,

    /// Cycles detected in the finished graph
    pub cycles: Vec<Cycle>,
}

impl InspectionResult {
    /// Whether any dependency cycle was detected.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Generate a report in the requested format.
    ///
    /// # Errors
    ///
    /// Returns an error if report generation fails.
    pub fn generate_report(&self, config: &Config, format: ReportFormat) -> crate::Result<String> {
        crate::reporter::Reporter::new(config).generate(self, format)
    }
}
