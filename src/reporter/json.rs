//! JSON report generator.

use crate::config::Config;
use crate::error::Result;
use crate::graph::Cycle;
use crate::reporter::ReportGenerator;
use crate::types::InspectionResult;
use serde::Serialize;

/// JSON report generator for machine consumption.
pub struct JsonReporter {
    /// Whether to pretty-print the document
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            pretty: config.output.pretty,
        }
    }
}

/// Top-level JSON report document.
#[derive(Serialize)]
struct JsonReport<'a> {
    root: &'a str,
    generated_at: String,
    package_count: usize,
    edge_count: usize,
    packages: Vec<JsonPackage<'a>>,
    cycles: &'a [Cycle],
}

#[derive(Serialize)]
struct JsonPackage<'a> {
    name: &'a str,
    dependencies: Vec<&'a str>,
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, result: &InspectionResult) -> Result<String> {
        let packages = result
            .graph
            .adjacency()
            .into_iter()
            .map(|(name, dependencies)| JsonPackage { name, dependencies })
            .collect();

        let report = JsonReport {
            root: &result.root,
            generated_at: chrono::Utc::now().to_rfc3339(),
            package_count: result.graph.package_count(),
            edge_count: result.graph.edge_count(),
            packages,
            cycles: &result.cycles,
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{CycleDetector, DependencyGraph};

    #[test]
    fn test_json_report_structure() {
        let mut graph = DependencyGraph::new();
        graph.record("a", &["b".to_string()]);
        graph.record("b", &["a".to_string()]);

        let cycles = CycleDetector::new().detect(&graph);
        let result = InspectionResult {
            root: "a".to_string(),
            graph,
            cycles,
        };

        let report = JsonReporter::new(&Config::default())
            .generate(&result)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();

        assert_eq!(value["root"], "a");
        assert_eq!(value["package_count"], 2);
        assert_eq!(value["packages"][0]["name"], "a");
        assert_eq!(value["packages"][0]["dependencies"][0], "b");
        // Cycles serialize as plain name arrays
        assert_eq!(value["cycles"][0][0], "a");
        assert_eq!(value["cycles"][0][1], "b");
    }
}
