//! CLI module for filecontent
//!
//! Argument parsing and subcommand wiring for the `filecontent` binary.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// filecontent - Make sure a file holds exactly the content you ask for
///
/// Creates the file when it is missing, rewrites it when it differs and
/// leaves it alone otherwise.
#[derive(Parser, Debug, Clone)]
#[command(name = "filecontent")]
#[command(version)]
#[command(about = "Idempotently ensure a text file holds the given content", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Run in check mode (dry-run, don't make changes)
    #[arg(long = "check", global = true)]
    pub check_mode: bool,

    /// Output format
    #[arg(short = 'o', long, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true, env = "FILECONTENT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Reconcile a file's content
    Apply(commands::apply::ApplyArgs),

    /// Report what `apply` would do without touching the file
    Check(commands::check::CheckArgs),

    /// Run the JSON module protocol (arguments on stdin or in a file)
    Module(commands::module::ModuleArgs),
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the effective verbosity level (0-3)
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(3)
    }

    /// Check if JSON output is requested
    pub fn is_json(&self) -> bool {
        matches!(self.output, OutputFormat::Json)
    }
}
