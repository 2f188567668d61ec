//! Command-line interface module.
//!
//! This module defines the CLI structure using Clap, including all
//! commands, arguments, and options.
//!
//! # Commands
//!
//! - `inspect`: Build and report the transitive dependency graph
//! - `deps`: List the direct dependencies of one package
//! - `init`: Create an example configuration file
//! - `validate`: Validate a configuration file
//!
//! # Example Usage
//!
//! ```bash
//! # Inspect a package's transitive dependency graph
//! cratemap inspect serde
//!
//! # Limit depth and exclude test helpers
//! cratemap inspect tokio --max-depth 3 --filter test
//!
//! # Use the built-in offline data, emit JSON
//! cratemap inspect serde --offline --format json --output report.json
//!
//! # Show one package's direct dependencies
//! cratemap deps serde
//!
//! # Initialize configuration
//! cratemap init
//!
//! # Validate configuration
//! cratemap validate cratemap.yaml
//! ```

use crate::types::ReportFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// cratemap - transitive dependency graph inspector for crates.io packages.
#[derive(Parser, Debug)]
#[command(
    name = "cratemap",
    author,
    version,
    about = "Transitive dependency graph inspector for crates.io packages",
    long_about = "cratemap walks a package's transitive dependencies through the \
                  crates.io API (or built-in offline data), assembles them into a \
                  directed graph, detects dependency cycles, and reports the result."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "CRATEMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and report the transitive dependency graph of a package
    #[command(visible_alias = "i")]
    Inspect(InspectArgs),

    /// List the direct dependencies of a single package
    #[command(visible_alias = "d")]
    Deps(DepsArgs),

    /// Create an example configuration file
    Init,

    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Arguments for the inspect command.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Root package to inspect (falls back to the configuration file)
    #[arg(value_name = "PACKAGE")]
    pub package: Option<String>,

    /// Maximum traversal depth (-1 = unlimited)
    #[arg(long, value_name = "DEPTH", allow_hyphen_values = true)]
    pub max_depth: Option<i64>,

    /// Exclude dependencies whose name contains this substring
    #[arg(long, value_name = "SUBSTRING")]
    pub filter: Option<String>,

    /// Use built-in static dependency data instead of the registry
    #[arg(long)]
    pub offline: bool,

    /// Base URL of the package registry API
    #[arg(long, value_name = "URL", env = "CRATEMAP_REGISTRY_URL")]
    pub registry_url: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text", value_enum)]
    pub format: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exit with code 1 when dependency cycles are detected
    #[arg(long)]
    pub strict: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for the deps command.
#[derive(Args, Debug)]
pub struct DepsArgs {
    /// Package to list direct dependencies for
    #[arg(value_name = "PACKAGE", required = true)]
    pub package: String,

    /// Use built-in static dependency data instead of the registry
    #[arg(long)]
    pub offline: bool,

    /// Base URL of the package registry API
    #[arg(long, value_name = "URL", env = "CRATEMAP_REGISTRY_URL")]
    pub registry_url: Option<String>,
}

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(value_name = "FILE", default_value = "cratemap.yaml")]
    pub config: PathBuf,
}
