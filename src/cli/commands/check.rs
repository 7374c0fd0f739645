//! Check command - Dry-run mode
//!
//! Same arguments as `apply`, always in check mode.

use super::apply::ApplyArgs;
use super::{CommandContext, Runnable};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Arguments for the check command
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Path of the file to inspect
    #[arg(required = true)]
    pub path: PathBuf,

    /// Content the file should hold
    #[arg(long, allow_hyphen_values = true)]
    pub content: String,
}

impl Runnable for CheckArgs {
    fn run(&self, ctx: &mut CommandContext) -> Result<i32> {
        // Force check mode
        ctx.check_mode = true;

        ctx.output.banner("CHECK MODE - DRY RUN");

        let apply_args = ApplyArgs {
            path: self.path.clone(),
            content: self.content.clone(),
        };

        apply_args.run(ctx)
    }
}
