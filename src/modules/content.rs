//! File content module - Ensure a text file holds the given content
//!
//! Creates the file when it is absent and rewrites it when its content
//! differs. Ownership, permissions and parent directories are left alone.

use super::{
    Module, ModuleContext, ModuleError, ModuleOutput, ModuleParams, ModuleResult, ParamExt,
};
use crate::invocation::ModuleArgs;
use crate::reconcile::{reconcile, Request};

/// Module for reconciling a file's content
pub struct ContentModule;

impl ContentModule {
    fn request_from_params(
        params: &ModuleParams,
        context: &ModuleContext,
    ) -> ModuleResult<Request> {
        let args = ModuleArgs {
            path: params.get_string_required("path")?,
            content: params.get_string_required("content")?,
            check_mode: context.check_mode,
        };
        Ok(args.into_request()?)
    }
}

impl Module for ContentModule {
    fn name(&self) -> &'static str {
        "file_content"
    }

    fn description(&self) -> &'static str {
        "Ensure a text file holds the specified content"
    }

    fn validate_params(&self, params: &ModuleParams) -> ModuleResult<()> {
        let path = params.get_string_required("path")?;
        params.get_string_required("content")?;

        if path.is_empty() {
            return Err(ModuleError::InvalidParameter(
                "path must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn execute(
        &self,
        params: &ModuleParams,
        context: &ModuleContext,
    ) -> ModuleResult<ModuleOutput> {
        let request = Self::request_from_params(params, context)?;
        let result = reconcile(&request)?;

        let output = if result.changed {
            ModuleOutput::changed(result.message)
        } else {
            ModuleOutput::ok(result.message)
        };

        Ok(output.with_data("path", serde_json::json!(result.path)))
    }

    fn required_params(&self) -> &[&'static str] {
        &["path", "content"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::ModuleStatus;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn params(path: &std::path::Path, content: &str) -> ModuleParams {
        let mut params: ModuleParams = HashMap::new();
        params.insert(
            "path".to_string(),
            serde_json::json!(path.to_str().unwrap()),
        );
        params.insert("content".to_string(), serde_json::json!(content));
        params
    }

    #[test]
    fn test_content_creates_file() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("test.txt");

        let module = ContentModule;
        let context = ModuleContext::default();
        let result = module
            .execute(&params(&dest, "Hello, World!"), &context)
            .unwrap();

        assert!(result.changed);
        assert_eq!(result.status, ModuleStatus::Changed);
        assert_eq!(result.msg, format!("File {} created", dest.display()));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "Hello, World!");
        assert_eq!(
            result.data.get("path"),
            Some(&serde_json::json!(dest.to_str().unwrap()))
        );
    }

    #[test]
    fn test_content_idempotent() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("test.txt");
        fs::write(&dest, "Same content").unwrap();

        let module = ContentModule;
        let result = module
            .execute(&params(&dest, "Same content"), &ModuleContext::default())
            .unwrap();

        assert!(!result.changed);
        assert_eq!(result.status, ModuleStatus::Ok);
    }

    #[test]
    fn test_content_check_mode() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("test.txt");

        let module = ContentModule;
        let context = ModuleContext::default().with_check_mode(true);
        let result = module.check(&params(&dest, "Hello"), &context).unwrap();

        assert!(result.changed);
        assert!(result.msg.ends_with("will be changed"));
        assert!(!dest.exists());
    }

    #[test]
    fn test_validate_params() {
        let module = ContentModule;

        let mut missing: ModuleParams = HashMap::new();
        missing.insert("path".to_string(), serde_json::json!("/tmp/x"));
        assert!(matches!(
            module.validate_params(&missing),
            Err(ModuleError::MissingParameter(p)) if p == "content"
        ));

        let mut empty = params(std::path::Path::new("/tmp/x"), "hi");
        empty.insert("path".to_string(), serde_json::json!(""));
        assert!(matches!(
            module.validate_params(&empty),
            Err(ModuleError::InvalidParameter(_))
        ));

        let mut numeric = params(std::path::Path::new("/tmp/x"), "hi");
        numeric.insert("content".to_string(), serde_json::json!(42));
        assert!(matches!(
            module.validate_params(&numeric),
            Err(ModuleError::InvalidParameter(_))
        ));
    }
}
