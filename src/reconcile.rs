//! Idempotent file-content reconciliation.
//!
//! [`reconcile`] compares the desired content of a file with what is on disk
//! and takes the minimal action to converge them: create the file, replace
//! its content, or do nothing. In dry-run mode it reports the same decision
//! without touching the filesystem.
//!
//! Every call observes the file fresh. Nothing is cached between calls and
//! there is no locking: two concurrent reconciliations of the same path race,
//! and the last writer wins.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Desired state for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    path: PathBuf,
    content: String,
    dry_run: bool,
}

impl Request {
    /// Create a request to apply `content` at `path`.
    ///
    /// Fails with [`Error::InvalidRequest`] when the path is empty.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidRequest("path must not be empty".to_string()));
        }

        Ok(Self {
            path,
            content: content.into(),
            dry_run: false,
        })
    }

    /// Switch the request to dry-run (check) mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}

/// What is on disk right now at the target path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileState {
    /// Whether a filesystem entry is present at the path
    pub exists: bool,
    /// Current content; empty when the file does not exist
    pub current_content: String,
}

impl FileState {
    /// Observe the target path.
    ///
    /// A missing entry is not an error. An entry that exists but cannot be
    /// read as text (permissions, a directory, invalid UTF-8) is an
    /// [`Error::Read`].
    pub fn observe(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let current_content = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        Ok(Self {
            exists: true,
            current_content,
        })
    }

    /// Whether `desired` differs from what is on disk.
    ///
    /// An absent file always differs, even from empty content.
    pub fn differs_from(&self, desired: &str) -> bool {
        !self.exists || self.current_content != desired
    }

    /// The action needed to converge on `desired`.
    pub fn plan(&self, desired: &str) -> Action {
        if !self.exists {
            Action::Create
        } else if self.current_content != desired {
            Action::Update
        } else {
            Action::None
        }
    }
}

/// Action the reconciler takes (or would take) for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// File is absent and will be written
    Create,
    /// File exists with different content and will be truncated and rewritten
    Update,
    /// File already holds the desired content
    None,
}

impl Action {
    pub fn is_change(&self) -> bool {
        !matches!(self, Action::None)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create => write!(f, "create"),
            Action::Update => write!(f, "update"),
            Action::None => write!(f, "none"),
        }
    }
}

/// Result of a successful reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Whether the file was (or in dry-run, would be) modified
    pub changed: bool,
    /// Target path as given in the request
    pub path: String,
    /// Human-readable description of what happened
    pub message: String,
}

impl Reconciliation {
    fn new(changed: bool, path: &Path, message: String) -> Self {
        Self {
            changed,
            path: path.display().to_string(),
            message,
        }
    }
}

/// Bring the file at `request.path()` in line with `request.content()`.
///
/// Reads the file once if it exists and writes it at most once, only in
/// apply mode and only when the content differs. Writes truncate; parent
/// directories are never created. Any I/O failure aborts with no partial
/// result.
pub fn reconcile(request: &Request) -> Result<Reconciliation> {
    let path = request.path();
    let state = FileState::observe(path)?;
    let content_changed = state.differs_from(request.content());

    debug!(
        path = %path.display(),
        exists = state.exists,
        content_changed,
        dry_run = request.dry_run(),
        "Observed file state"
    );

    if request.dry_run() {
        let changed = content_changed || !state.exists;
        let message = if content_changed {
            format!("File {} will be changed", path.display())
        } else if !state.exists {
            format!("File {} will be created", path.display())
        } else {
            format!("File {} does not require changes", path.display())
        };

        debug!(path = %path.display(), changed, "Dry run, no changes made");
        return Ok(Reconciliation::new(changed, path, message));
    }

    let action = state.plan(request.content());
    debug!(path = %path.display(), %action, "Planned action");

    if !action.is_change() {
        debug!(path = %path.display(), "File already up to date");
        return Ok(Reconciliation::new(
            false,
            path,
            format!("File {} does not require changes", path.display()),
        ));
    }

    fs::write(path, request.content()).map_err(|e| Error::write(path, e))?;

    let message = if action == Action::Create {
        format!("File {} created", path.display())
    } else {
        format!("File {} updated", path.display())
    };
    info!(path = %path.display(), %action, bytes = request.content().len(), "Wrote file");
    Ok(Reconciliation::new(true, path, message))
}

/// Failure half of an [`Outcome`].
///
/// Serialized with `failed: true` and `changed: false`: a failed
/// reconciliation never confirms a mutation, even if a partial write landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Target path, when the failure happened after a path was known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Error text, including the path and OS error where relevant
    #[serde(rename = "msg")]
    pub message: String,
}

#[derive(Serialize)]
struct FailureBody<'a> {
    failed: bool,
    changed: bool,
    #[serde(flatten)]
    failure: &'a Failure,
}

/// Either a completed reconciliation or the reason it was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(Reconciliation),
    Failure(Failure),
}

impl Outcome {
    /// Wrap the result of [`reconcile`] for `path`.
    pub fn from_result(path: &Path, result: Result<Reconciliation>) -> Self {
        match result {
            Ok(reconciliation) => Outcome::Success(reconciliation),
            Err(err) => Outcome::Failure(Failure {
                path: Some(err.path().unwrap_or(path).display().to_string()),
                message: err.to_string(),
            }),
        }
    }

    /// A failure that happened before a path was known.
    pub fn failed(message: impl Into<String>) -> Self {
        Outcome::Failure(Failure {
            path: None,
            message: message.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Whether the file was modified. Always false on failure.
    pub fn changed(&self) -> bool {
        match self {
            Outcome::Success(r) => r.changed,
            Outcome::Failure(_) => false,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Outcome::Success(r) => Some(&r.path),
            Outcome::Failure(f) => f.path.as_deref(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Success(r) => &r.message,
            Outcome::Failure(f) => &f.message,
        }
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// Render the outcome as the JSON object handed back to the caller.
    pub fn to_json(&self) -> serde_json::Value {
        let value = match self {
            Outcome::Success(r) => serde_json::to_value(r),
            Outcome::Failure(f) => serde_json::to_value(FailureBody {
                failed: true,
                changed: false,
                failure: f,
            }),
        };
        value.unwrap_or_else(|e| serde_json::json!({ "failed": true, "msg": e.to_string() }))
    }
}

impl From<Reconciliation> for Outcome {
    fn from(reconciliation: Reconciliation) -> Self {
        Outcome::Success(reconciliation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_request_rejects_empty_path() {
        let err = Request::new("", "hello").unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn test_request_defaults_to_apply() {
        let request = Request::new("/tmp/x", "hello").unwrap();
        assert!(!request.dry_run());
        assert!(request.with_dry_run(true).dry_run());
    }

    #[test]
    fn test_observe_missing_file() {
        let temp = TempDir::new().unwrap();
        let state = FileState::observe(&temp.path().join("missing.txt")).unwrap();
        assert!(!state.exists);
        assert!(state.current_content.is_empty());
    }

    #[test]
    fn test_absent_file_differs_from_empty_content() {
        let state = FileState::default();
        assert!(state.differs_from(""));
        assert_eq!(state.plan(""), Action::Create);
    }

    #[test]
    fn test_plan() {
        let state = FileState {
            exists: true,
            current_content: "hello".to_string(),
        };
        assert_eq!(state.plan("hello"), Action::None);
        assert_eq!(state.plan("world"), Action::Update);
        assert!(Action::Update.is_change());
        assert!(!Action::None.is_change());
    }

    #[test]
    fn test_dry_run_on_absent_file_reports_will_be_changed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("new.txt");

        let request = Request::new(&path, "").unwrap().with_dry_run(true);
        let result = reconcile(&request).unwrap();

        assert!(result.changed);
        assert_eq!(
            result.message,
            format!("File {} will be changed", path.display())
        );
        assert!(!path.exists());
    }

    #[test]
    fn test_outcome_failure_json() {
        let path = Path::new("/root/secret");
        let outcome = Outcome::from_result(
            path,
            Err(Error::read(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied"),
            )),
        );

        assert!(!outcome.is_success());
        assert!(!outcome.changed());
        assert_eq!(outcome.exit_code(), 1);

        let json = outcome.to_json();
        assert_eq!(json["failed"], serde_json::json!(true));
        assert_eq!(json["changed"], serde_json::json!(false));
        assert_eq!(json["path"], serde_json::json!("/root/secret"));
        assert!(json["msg"]
            .as_str()
            .unwrap()
            .contains("Permission denied"));
    }

    #[test]
    fn test_outcome_success_json() {
        let outcome = Outcome::from(Reconciliation {
            changed: true,
            path: "/tmp/a".to_string(),
            message: "File /tmp/a created".to_string(),
        });

        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(
            outcome.to_json(),
            serde_json::json!({
                "changed": true,
                "path": "/tmp/a",
                "message": "File /tmp/a created",
            })
        );
    }

    #[test]
    fn test_outcome_failed_without_path() {
        let outcome = Outcome::failed("missing required arguments: path");
        assert!(outcome.path().is_none());
        let json = outcome.to_json();
        assert!(json.get("path").is_none());
        assert_eq!(json["msg"], serde_json::json!("missing required arguments: path"));
    }
}
