//! Output formatting module for filecontent
//!
//! Renders reconciliation outcomes as task-status lines or JSON.

use colored::Colorize;
use filecontent::reconcile::Outcome;

/// Result status of a single reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Nothing needed to change
    Ok,
    /// The file was (or would be) written
    Changed,
    /// Reconciliation failed
    Failed,
}

impl TaskStatus {
    /// Status for an outcome
    pub fn of(outcome: &Outcome) -> Self {
        if !outcome.is_success() {
            TaskStatus::Failed
        } else if outcome.changed() {
            TaskStatus::Changed
        } else {
            TaskStatus::Ok
        }
    }

    /// Get the colored string representation
    pub fn colored_string(&self) -> String {
        match self {
            TaskStatus::Ok => "ok".green().to_string(),
            TaskStatus::Changed => "changed".yellow().to_string(),
            TaskStatus::Failed => "failed".red().bold().to_string(),
        }
    }

    /// Get the plain string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Ok => "ok",
            TaskStatus::Changed => "changed",
            TaskStatus::Failed => "failed",
        }
    }
}

/// Output formatter for different output modes
pub struct OutputFormatter {
    /// Use colored output
    use_color: bool,
    /// JSON output mode
    json_mode: bool,
    /// Verbosity level
    verbosity: u8,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(use_color: bool, json_mode: bool, verbosity: u8) -> Self {
        // Respect NO_COLOR environment variable
        let use_color = use_color && std::env::var("NO_COLOR").is_err();

        Self {
            use_color,
            json_mode,
            verbosity,
        }
    }

    /// Print a banner/header
    pub fn banner(&self, title: &str) {
        if self.json_mode {
            return;
        }

        let line = "=".repeat(title.len() + 4);
        if self.use_color {
            println!("\n{}", line.bright_blue());
            println!("{}", format!("  {}  ", title).bright_blue().bold());
            println!("{}\n", line.bright_blue());
        } else {
            println!("\n{}", line);
            println!("  {}  ", title);
            println!("{}\n", line);
        }
    }

    /// Print one result line: `status: [path] => message`
    pub fn task_result(&self, path: &str, status: TaskStatus, message: &str) {
        let status_str = if self.use_color {
            status.colored_string()
        } else {
            status.as_str().to_string()
        };

        let path_str = if self.use_color {
            path.bright_white().bold().to_string()
        } else {
            path.to_string()
        };

        println!("{}: [{}] => {}", status_str, path_str, message);
    }

    /// Print a reconciliation outcome in the selected format
    pub fn outcome(&self, outcome: &Outcome, fallback_path: &str) {
        if self.json_mode {
            println!("{}", outcome.to_json());
            return;
        }

        let path = outcome.path().unwrap_or(fallback_path);
        self.task_result(path, TaskStatus::of(outcome), outcome.message());
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.json_mode {
            let warn = serde_json::json!({
                "type": "warning",
                "message": message
            });
            eprintln!("{}", warn);
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "WARNING:".yellow().bold(), message);
        } else {
            eprintln!("WARNING: {}", message);
        }
    }

    /// Print a debug message (only at -vv and above)
    pub fn debug(&self, message: &str) {
        if self.json_mode || self.verbosity < 2 {
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "DEBUG:".bright_black(), message.bright_black());
        } else {
            eprintln!("DEBUG: {}", message);
        }
    }
}
