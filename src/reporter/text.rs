//! Plain text report generator.

use crate::config::Config;
use crate::error::Result;
use crate::reporter::ReportGenerator;
use crate::types::InspectionResult;
use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table};

/// Text report generator for CLI output.
pub struct TextReporter {
    /// Whether to use colors
    use_colors: bool,
}

impl TextReporter {
    /// Create a new text reporter.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            use_colors: config.output.colored,
        }
    }
}

impl ReportGenerator for TextReporter {
    fn generate(&self, result: &InspectionResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header());
        output.push('\n');

        output.push_str(&self.format_summary(result));
        output.push('\n');

        output.push_str(&self.format_graph(result));
        output.push('\n');

        if !result.graph.is_empty() {
            output.push_str(&self.format_counts(result));
            output.push('\n');
        }

        output.push_str(&self.format_cycles(result));

        Ok(output)
    }
}

impl TextReporter {
    fn section_title(&self, title: &str) -> String {
        if self.use_colors {
            title.bright_cyan().bold().to_string()
        } else {
            title.to_string()
        }
    }

    /// Format the report header.
    fn format_header(&self) -> String {
        let title = "Cratemap Dependency Report";
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

        if self.use_colors {
            format!(
                "\n{} {} {}\n{}\n",
                title.bright_white().bold(),
                version.dimmed(),
                format!("({timestamp})").dimmed(),
                "=".repeat(80).bright_blue(),
            )
        } else {
            format!("\n{title} {version} ({timestamp})\n{}\n", "=".repeat(80))
        }
    }

    /// Format the summary section.
    fn format_summary(&self, result: &InspectionResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{}\n", self.section_title("Summary")));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        output.push_str(&format!("  Root package : {}\n", result.root));
        output.push_str(&format!(
            "  Packages     : {}\n",
            result.graph.package_count()
        ));
        output.push_str(&format!("  Edges        : {}\n", result.graph.edge_count()));

        let cycle_count = result.cycles.len();
        if self.use_colors && cycle_count > 0 {
            output.push_str(&format!(
                "  Cycles       : {}\n",
                cycle_count.to_string().yellow().bold()
            ));
        } else {
            output.push_str(&format!("  Cycles       : {cycle_count}\n"));
        }

        output
    }

    /// Format the adjacency listing.
    fn format_graph(&self, result: &InspectionResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{}\n", self.section_title("Dependency Graph")));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        if result.graph.is_empty() {
            output.push_str("  (empty graph)\n");
            return output;
        }

        for (package, dependencies) in result.graph.adjacency() {
            let name = if self.use_colors {
                package.bright_white().to_string()
            } else {
                package.to_string()
            };

            if dependencies.is_empty() {
                output.push_str(&format!("  {name} (no dependencies)\n"));
            } else {
                output.push_str(&format!("  {name}\n"));
                output.push_str(&format!(
                    "    └── depends on: {}\n",
                    dependencies.join(", ")
                ));
            }
        }

        output
    }

    /// Format the out-degree table.
    fn format_counts(&self, result: &InspectionResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{}\n",
            self.section_title("Direct Dependency Counts")
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        let mut table = Table::new();
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![Cell::new("Package"), Cell::new("Direct dependencies")]);

        for (package, count) in result.graph.dependency_counts() {
            table.add_row(vec![Cell::new(package), Cell::new(count)]);
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    /// Format the cycle listing.
    fn format_cycles(&self, result: &InspectionResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{}\n", self.section_title("Cycles")));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        if result.cycles.is_empty() {
            output.push_str("  No dependency cycles detected.\n");
            return output;
        }

        for (i, cycle) in result.cycles.iter().enumerate() {
            let line = format!("  {}. {cycle}\n", i + 1);
            if self.use_colors {
                output.push_str(&line.yellow().to_string());
            } else {
                output.push_str(&line);
            }
        }

        output
    }
}
