//! cratemap CLI entry point.
//!
//! This binary provides the command-line interface for cratemap.

use clap::Parser;
use cratemap::cli::{Cli, Commands};
use cratemap::{Config, CratemapError, Inspector};
use std::error::Error;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    // Run the appropriate command
    match run(cli).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");

            // Print error with full chain
            eprintln!("Error: {e}");

            // Print error chain (cause chain)
            let mut source = e.source();
            if source.is_some() {
                eprintln!("\nCaused by:");
                let mut i = 0;
                while let Some(cause) = source {
                    eprintln!("  {i}: {cause}");
                    source = cause.source();
                    i += 1;
                }
            }

            // Typed errors carry their own exit code
            let code = e
                .downcast_ref::<CratemapError>()
                .map_or(1, CratemapError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        // First try to use RUST_LOG from environment, otherwise use verbose flag
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let base_level = match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            // Filter string: cratemap at the requested level, everything else at warn
            EnvFilter::new(format!("warn,cratemap={base_level}"))
        })
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    // Load configuration
    tracing::debug!("Loading configuration");
    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Inspect(args) => {
            config.merge_cli_args(&args);
            tracing::debug!(
                package = %config.package,
                offline = config.fetch.offline,
                max_depth = config.traversal.max_depth,
                filter = %config.traversal.filter,
                "Effective configuration"
            );

            let inspector = Inspector::new(config.clone());
            let result = inspector.inspect().await?;

            // Generate report
            let report = result.generate_report(&config, args.format)?;

            // Output report
            if let Some(output_path) = args.output {
                std::fs::write(&output_path, &report)?;
                tracing::info!(path = %output_path.display(), "Report written");
            } else {
                println!("{report}");
            }

            // Return appropriate exit code
            let exit_code = if result.has_cycles() && args.strict {
                1 // Cycles found in strict mode
            } else {
                0 // Success
            };

            Ok(ExitCode::from(exit_code))
        }

        Commands::Deps(args) => {
            if args.offline {
                config.fetch.offline = true;
            }
            if let Some(registry_url) = args.registry_url {
                config.fetch.registry_url = registry_url;
            }

            let inspector = Inspector::new(config);
            let dependencies = inspector.direct_dependencies(&args.package).await?;

            println!("Direct dependencies of '{}':", args.package);
            if dependencies.is_empty() {
                println!("  (none)");
            } else {
                for (i, dependency) in dependencies.iter().enumerate() {
                    println!("  {:2}. {dependency}", i + 1);
                }
            }

            Ok(ExitCode::from(0))
        }

        Commands::Init => {
            // Generate example configuration file
            let example_config = Config::example_yaml();
            let config_path = std::path::Path::new("cratemap.yaml");

            if config_path.exists() {
                anyhow::bail!(
                    "Configuration file already exists: {}",
                    config_path.display()
                );
            }

            std::fs::write(config_path, example_config)?;
            println!("Created example configuration: cratemap.yaml");
            Ok(ExitCode::from(0))
        }

        Commands::Validate(args) => {
            // Validate configuration file
            let config_content = std::fs::read_to_string(&args.config)?;
            match Config::from_yaml(&config_content).and_then(|c| c.validate().map(|()| c)) {
                Ok(_) => {
                    println!("Configuration is valid: {}", args.config.display());
                    Ok(ExitCode::from(0))
                }
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    Ok(ExitCode::from(1))
                }
            }
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    // Check for explicit config file
    if let Some(ref config_path) = cli.config {
        tracing::debug!(path = %config_path.display(), "Loading configuration from explicit path");
        let content = std::fs::read_to_string(config_path)?;
        return Ok(Config::from_yaml(&content)?);
    }

    // Look for default config files
    let default_paths = ["cratemap.yaml", "cratemap.yml", ".cratemap.yaml"];
    tracing::debug!("Searching for default configuration files");
    for path in &default_paths {
        if std::path::Path::new(path).exists() {
            tracing::debug!(path = %path, "Found configuration file");
            let content = std::fs::read_to_string(path)?;
            return Ok(Config::from_yaml(&content)?);
        }
    }

    tracing::debug!("No configuration file found, using default configuration");
    Ok(Config::default())
}
