//! Configuration module for filecontent
//!
//! Handles loading and merging configuration from multiple sources:
//! - Default values
//! - System configuration (/etc/filecontent/filecontent.cfg)
//! - User configuration (~/.filecontent.cfg)
//! - Project configuration (./filecontent.cfg)
//! - Environment variables

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default settings
    pub defaults: Defaults,

    /// Colors and output settings
    pub colors: ColorsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Default configuration values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Run `apply` in check mode unless told otherwise
    pub check_mode: Option<bool>,
}

/// Colors configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Enable colors (on when unset)
    pub enabled: Option<bool>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no -v flag is given
    pub log_level: Option<String>,

    /// Log format
    pub log_format: Option<LogFormat>,
}

impl LoggingConfig {
    /// Effective log level (`warn` when unset)
    pub fn level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }

    /// Effective log format (text when unset)
    pub fn format(&self) -> LogFormat {
        self.log_format.unwrap_or_default()
    }
}

impl Config {
    /// Load configuration from all sources
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Config::default();

        for path in Self::get_config_paths(config_path) {
            if path.exists() {
                config = config.merge(Self::from_file(&path)?);
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Get the list of configuration file paths to check
    fn get_config_paths(explicit_path: Option<&PathBuf>) -> Vec<PathBuf> {
        if let Some(path) = explicit_path {
            return vec![path.clone()];
        }

        let mut paths = vec![PathBuf::from("/etc/filecontent/filecontent.cfg")];

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".filecontent.cfg"));
            paths.push(home.join(".filecontent/filecontent.cfg"));
        }

        paths.push(PathBuf::from("filecontent.cfg"));
        paths
    }

    /// Load from a specific file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config: Config = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            "toml" => toml::from_str(&content)?,
            _ => {
                // .cfg and extensionless files: TOML first, then YAML
                toml::from_str(&content)
                    .or_else(|_| serde_yaml::from_str(&content))
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            }
        };

        Ok(config)
    }

    /// Merge a later layer into this one; every setting the later layer
    /// names wins, unset settings fall through
    fn merge(&self, other: Config) -> Config {
        Config {
            defaults: Defaults {
                check_mode: other.defaults.check_mode.or(self.defaults.check_mode),
            },
            colors: ColorsConfig {
                enabled: other.colors.enabled.or(self.colors.enabled),
            },
            logging: LoggingConfig {
                log_level: other
                    .logging
                    .log_level
                    .or_else(|| self.logging.log_level.clone()),
                log_format: other.logging.log_format.or(self.logging.log_format),
            },
        }
    }

    /// Whether `apply` runs in check mode by default
    pub fn check_mode(&self) -> bool {
        self.defaults.check_mode.unwrap_or(false)
    }

    /// Whether colored output is enabled
    pub fn colors_enabled(&self) -> bool {
        self.colors.enabled.unwrap_or(true)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("FILECONTENT_CHECK_MODE") {
            self.defaults.check_mode = Some(matches!(
                value.to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ));
        }

        if let Ok(level) = std::env::var("FILECONTENT_LOG_LEVEL") {
            self.logging.log_level = Some(level);
        }

        if let Ok(format) = std::env::var("FILECONTENT_LOG_FORMAT") {
            if format.eq_ignore_ascii_case("json") {
                self.logging.log_format = Some(LogFormat::Json);
            } else if format.eq_ignore_ascii_case("text") {
                self.logging.log_format = Some(LogFormat::Text);
            }
        }

        if std::env::var("NO_COLOR").is_ok() || std::env::var("FILECONTENT_NO_COLOR").is_ok() {
            self.colors.enabled = Some(false);
        }
    }
}
