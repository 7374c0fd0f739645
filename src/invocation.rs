//! Module invocation boundary.
//!
//! Automation hosts hand a module its arguments as a JSON object, either bare
//! or wrapped as `{"ANSIBLE_MODULE_ARGS": {...}}`, and expect a single JSON
//! object back. This module turns that argument object into a typed
//! [`ModuleArgs`], validates it before the filesystem is touched, runs the
//! `file_content` module through the registry and hands back an [`Outcome`]
//! ready to be printed.

use crate::error::{Error, Result};
use crate::modules::{ModuleContext, ModuleError, ModuleParams, ModuleRegistry};
use crate::reconcile::{Outcome, Reconciliation, Request};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Key under which hosts wrap module arguments.
pub const ARGS_ENVELOPE_KEY: &str = "ANSIBLE_MODULE_ARGS";

/// Registry name of the module behind [`invoke`].
pub const FILE_CONTENT_MODULE: &str = "file_content";

/// Typed module arguments.
///
/// `path` and `content` are required non-null strings. Host-internal keys
/// other than `_ansible_check_mode` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleArgs {
    /// Target file path
    pub path: String,
    /// Desired file content
    pub content: String,
    /// Dry-run flag injected by the host
    #[serde(rename = "_ansible_check_mode", default)]
    pub check_mode: bool,
}

impl ModuleArgs {
    /// Convert into a reconciliation request, rejecting an empty path.
    pub fn into_request(self) -> Result<Request> {
        Ok(Request::new(self.path, self.content)?.with_dry_run(self.check_mode))
    }

    /// The parameter bag handed to the `file_content` module.
    pub fn to_params(&self) -> ModuleParams {
        let mut params = ModuleParams::new();
        params.insert("path".to_string(), serde_json::json!(self.path));
        params.insert("content".to_string(), serde_json::json!(self.content));
        params
    }

    /// Module context carrying the host's check-mode flag.
    pub fn context(&self) -> ModuleContext {
        ModuleContext::new().with_check_mode(self.check_mode)
    }
}

/// Parse a JSON argument document, bare or wrapped.
pub fn parse_args(input: &str) -> Result<ModuleArgs> {
    let mut value: serde_json::Value = serde_json::from_str(input)?;

    if let Some(inner) = value
        .as_object_mut()
        .and_then(|obj| obj.remove(ARGS_ENVELOPE_KEY))
    {
        value = inner;
    }

    let args: ModuleArgs = serde_json::from_value(value)?;
    debug!(path = %args.path, check_mode = args.check_mode, "Parsed module arguments");
    Ok(args)
}

/// Read the raw argument document from `source`, or from stdin when `None`.
pub fn read_input(source: Option<&Path>) -> Result<String> {
    match source {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// Run one module invocation from a raw JSON argument document.
///
/// Argument errors produce a failure without a path; I/O errors during
/// reconciliation produce a failure carrying the target path.
pub fn invoke(input: &str) -> Outcome {
    invoke_with(&ModuleRegistry::with_builtins(), input)
}

/// Like [`invoke`], dispatching `file_content` through `registry`.
pub fn invoke_with(registry: &ModuleRegistry, input: &str) -> Outcome {
    let args = match parse_args(input) {
        Ok(args) => args,
        Err(err) => return Outcome::failed(boundary_message(&err)),
    };

    match registry.execute(FILE_CONTENT_MODULE, &args.to_params(), &args.context()) {
        Ok(output) => Outcome::Success(Reconciliation {
            changed: output.changed,
            path: args.path,
            message: output.msg,
        }),
        Err(ModuleError::Failed(err)) if err.is_io_failure() => {
            Outcome::from_result(Path::new(&args.path), Err(err))
        }
        Err(err) => Outcome::failed(err.to_string()),
    }
}

fn boundary_message(err: &Error) -> String {
    match err {
        Error::JsonParse(e) if e.is_data() => format!("Invalid module arguments: {}", e),
        Error::JsonParse(e) => format!("Module arguments are not valid JSON: {}", e),
        other => other.to_string(),
    }
}
