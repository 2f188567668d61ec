//! Configuration module for cratemap.
//!
//! This module handles loading and validating configuration from:
//! - YAML configuration files (`cratemap.yaml`)
//! - Environment variables (expanded inside the YAML)
//! - CLI arguments (merged on top)
//!
//! # Configuration File Format
//!
//! ```yaml
//! # cratemap.yaml
//!
//! # Root package to inspect
//! package: serde
//!
//! # Fetcher options
//! fetch:
//!   registry_url: "https://crates.io"
//!   timeout_secs: 10
//!   offline: false
//!
//! # Traversal options
//! traversal:
//!   max_depth: -1        # -1 = unlimited
//!   filter: ""           # exclude dependencies containing this substring
//!
//! # Output options
//! output:
//!   colored: true
//!   graph_file: graph.svg
//! ```

use crate::error::{CratemapError, Result};
use crate::graph::TraversalOptions;
use serde::{Deserialize, Serialize};
use url::Url;

/// Fetcher options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    /// Base URL of the package registry API.
    pub registry_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Use the built-in static dependency data instead of the registry.
    pub offline: bool,

    /// User-Agent header sent with registry requests.
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            registry_url: default_registry_url(),
            timeout_secs: default_timeout_secs(),
            offline: false,
            user_agent: default_user_agent(),
        }
    }
}

/// Output options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Use colored output.
    pub colored: bool,

    /// Pretty-print JSON output.
    pub pretty: bool,

    /// Declared render target for the graph image. Accepted and validated,
    /// but image rendering is not implemented.
    pub graph_file: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            colored: true,
            pretty: true,
            graph_file: default_graph_file(),
        }
    }
}

/// Main configuration structure with nested sections.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Root package to inspect
    pub package: String,

    /// Fetcher options
    pub fetch: FetchOptions,

    /// Traversal options
    pub traversal: TraversalOptions,

    /// Output options
    pub output: OutputOptions,
}

fn default_registry_url() -> String {
    "https://crates.io".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("cratemap/{}", env!("CARGO_PKG_VERSION"))
}

fn default_graph_file() -> String {
    "graph.svg".to_string()
}

impl Config {
    /// Load configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn from_yaml(content: &str) -> Result<Self> {
        tracing::debug!("Parsing configuration from YAML");
        // First, expand environment variables
        let expanded = expand_env_vars(content);

        let config: Config =
            serde_yaml::from_str(&expanded).map_err(|e| CratemapError::ConfigParse {
                message: e.to_string(),
                source: None,
            })?;

        tracing::debug!(
            package = %config.package,
            offline = config.fetch.offline,
            max_depth = config.traversal.max_depth,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Validate the configuration before any traversal runs.
    ///
    /// # Errors
    ///
    /// Returns a config-family error describing the first invalid or
    /// missing parameter.
    pub fn validate(&self) -> Result<()> {
        if self.package.is_empty() {
            return Err(CratemapError::ConfigMissing {
                key: "package".to_string(),
            });
        }

        // The registry is only contacted in online mode
        if !self.fetch.offline {
            if self.fetch.registry_url.is_empty() {
                return Err(CratemapError::ConfigMissing {
                    key: "fetch.registry_url".to_string(),
                });
            }
            Url::parse(&self.fetch.registry_url).map_err(|e| CratemapError::ConfigValue {
                key: "fetch.registry_url".to_string(),
                message: e.to_string(),
            })?;
        }

        if self.traversal.max_depth < -1 {
            return Err(CratemapError::ConfigValue {
                key: "traversal.max_depth".to_string(),
                message: "must be -1 (unlimited) or a non-negative integer".to_string(),
            });
        }

        if self.fetch.timeout_secs == 0 {
            return Err(CratemapError::ConfigValue {
                key: "fetch.timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        let graph_file = self.output.graph_file.as_str();
        if !graph_file.is_empty()
            && !["svg", "png", "jpg"]
                .iter()
                .any(|ext| graph_file.ends_with(&format!(".{ext}")))
        {
            tracing::warn!(
                graph_file = %graph_file,
                "output.graph_file should use an svg, png or jpg extension"
            );
        }

        Ok(())
    }

    /// Generate an example YAML configuration.
    #[must_use]
    pub fn example_yaml() -> String {
        r#"# Cratemap Configuration File

# Root package to inspect (required)
package: serde

# Fetcher options
fetch:
  # Base URL of the package registry API
  registry_url: "https://crates.io"

  # Per-request timeout in seconds
  timeout_secs: 10

  # Use built-in static dependency data instead of the registry
  offline: false

# Traversal options
traversal:
  # Maximum traversal depth (-1 = unlimited)
  max_depth: -1

  # Exclude dependencies whose name contains this substring ("" = keep all)
  filter: ""

# Output options
output:
  # Use colored output in terminal
  colored: true

  # Declared graph image target (rendering not yet implemented)
  graph_file: graph.svg
"#
        .to_string()
    }

    /// Merge CLI arguments into the configuration.
    pub fn merge_cli_args(&mut self, args: &crate::cli::InspectArgs) {
        if let Some(ref package) = args.package {
            self.package = package.clone();
        }
        if let Some(max_depth) = args.max_depth {
            self.traversal.max_depth = max_depth;
        }
        if let Some(ref filter) = args.filter {
            self.traversal.filter = filter.clone();
        }
        if args.offline {
            self.fetch.offline = true;
        }
        if let Some(ref registry_url) = args.registry_url {
            self.fetch.registry_url = registry_url.clone();
        }
        if args.no_color {
            self.output.colored = false;
        }
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
fn expand_env_vars(content: &str) -> String {
    let mut result = content.to_string();

    // Find all ${VAR} patterns
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();
    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    // Find all $VAR patterns (word boundary)
    let re = regex::Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").unwrap();
    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}
