//! Module command - JSON in, JSON out
//!
//! Reads the argument document from a file or stdin and prints exactly one
//! JSON object on stdout. `--output` and `--check` do not apply here: the
//! host selects check mode through `_ansible_check_mode`.

use super::{CommandContext, Runnable};
use anyhow::Result;
use clap::Parser;
use filecontent::invocation::{invoke, read_input};
use filecontent::reconcile::Outcome;
use std::path::PathBuf;

/// Arguments for the module command
#[derive(Parser, Debug, Clone)]
pub struct ModuleArgs {
    /// File holding the JSON arguments (stdin when omitted)
    pub args_file: Option<PathBuf>,
}

impl Runnable for ModuleArgs {
    fn run(&self, ctx: &mut CommandContext) -> Result<i32> {
        if ctx.check_flag {
            ctx.output
                .warning("check mode is ignored by `module`; pass _ansible_check_mode instead");
        }

        let outcome = match read_input(self.args_file.as_deref()) {
            Ok(input) => invoke(&input),
            Err(e) => Outcome::failed(format!("Unable to read module arguments: {}", e)),
        };

        ctx.output.debug(&format!("Module outcome: {}", outcome.message()));
        println!("{}", outcome.to_json());

        Ok(outcome.exit_code())
    }
}
