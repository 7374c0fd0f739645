//! Subcommands module for filecontent CLI
//!
//! This module contains all the subcommand implementations.

pub mod apply;
pub mod check;
pub mod module;

use crate::cli::output::OutputFormatter;
use crate::config::Config;
use anyhow::Result;

/// Common context shared between commands
pub struct CommandContext {
    /// Output formatter
    pub output: OutputFormatter,
    /// Check mode (dry-run), from `--check` or `defaults.check_mode`
    pub check_mode: bool,
    /// Whether `--check` was given on the command line
    pub check_flag: bool,
}

impl CommandContext {
    /// Create a new command context from CLI arguments
    pub fn new(cli: &crate::cli::Cli, config: &Config) -> Self {
        let use_color = !cli.no_color && config.colors_enabled();
        let output = OutputFormatter::new(use_color, cli.is_json(), cli.verbosity());

        Self {
            output,
            check_mode: cli.check_mode || config.check_mode(),
            check_flag: cli.check_mode,
        }
    }
}

/// Trait for runnable commands
pub trait Runnable {
    /// Execute the command, returning the process exit status
    fn run(&self, ctx: &mut CommandContext) -> Result<i32>;
}
