//! filecontent - Idempotent file content management
//!
//! This is the main entry point for the filecontent CLI.

mod cli;
mod config;

use anyhow::Result;
use cli::commands::{CommandContext, Runnable};
use cli::{Cli, Commands};
use config::{Config, LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application version information
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_result = Config::load(cli.config.as_ref());
    let config = match &config_result {
        Ok(config) => config.clone(),
        Err(_) => Config::default(),
    };

    // Initialize logging based on verbosity
    init_logging(cli.verbosity(), &config.logging);

    if let Err(e) = &config_result {
        if cli.verbosity() >= 1 {
            eprintln!("Warning: Failed to load config: {:#}", e);
        }
    }

    if cli.verbosity() >= 2 {
        eprintln!("filecontent v{}", VERSION);
    }

    // Create command context
    let mut ctx = CommandContext::new(&cli, &config);

    // Execute the appropriate command
    let exit_code = match &cli.command {
        Commands::Apply(args) => args.run(&mut ctx)?,
        Commands::Check(args) => args.run(&mut ctx)?,
        Commands::Module(args) => args.run(&mut ctx)?,
    };

    std::process::exit(exit_code);
}

/// Initialize logging based on verbosity level
///
/// Logs always go to stderr; stdout carries results only.
fn init_logging(verbosity: u8, logging: &LoggingConfig) {
    let filter = match verbosity {
        0 => logging.level(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match logging.format() {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbosity >= 3),
            )
            .init(),
    }
}
