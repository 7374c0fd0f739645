//! Apply command - Reconcile a file's content
//!
//! Honours `--check` and `defaults.check_mode` from the configuration.

use super::{CommandContext, Runnable};
use anyhow::Result;
use clap::Parser;
use filecontent::reconcile::{reconcile, Outcome, Request};
use std::path::PathBuf;

/// Arguments for the apply command
#[derive(Parser, Debug, Clone)]
pub struct ApplyArgs {
    /// Path of the file to manage
    #[arg(required = true)]
    pub path: PathBuf,

    /// Content the file must hold
    #[arg(long, allow_hyphen_values = true)]
    pub content: String,
}

impl ApplyArgs {
    /// Build the request and run it through the reconciler
    pub(crate) fn reconcile(&self, check_mode: bool) -> Outcome {
        match Request::new(&self.path, &self.content) {
            Ok(request) => {
                let request = request.with_dry_run(check_mode);
                Outcome::from_result(request.path(), reconcile(&request))
            }
            Err(e) => Outcome::failed(e.to_string()),
        }
    }
}

impl Runnable for ApplyArgs {
    fn run(&self, ctx: &mut CommandContext) -> Result<i32> {
        ctx.output.debug(&format!(
            "Reconciling {} (check mode: {})",
            self.path.display(),
            ctx.check_mode
        ));

        let outcome = self.reconcile(ctx.check_mode);
        ctx.output
            .outcome(&outcome, &self.path.display().to_string());

        Ok(outcome.exit_code())
    }
}
