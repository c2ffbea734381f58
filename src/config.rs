//! Configuration System
//!
//! Layered configuration for the `shellcomp` binary: built-in defaults, the
//! user's global file, a project file, then `SHELLCOMP__*` environment
//! variables. Library users construct [`ShellcompConfig`] directly.

use crate::logging::LoggingConfig;
use crate::script::Shell;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::project_file::PROJECT_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShellcompConfig {
    #[serde(default)]
    pub completion: CompletionSettings,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the command tree comes from and how scripts ask for completions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSettings {
    /// Manifest describing the command tree
    #[serde(default)]
    pub manifest: Option<PathBuf>,

    /// Ask for `<TAB>description` suffixes
    #[serde(default = "default_true")]
    pub include_descriptions: bool,

    /// Shell used by `completion` when none is given on the command line
    #[serde(default)]
    pub default_shell: Option<Shell>,
}

fn default_true() -> bool {
    true
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            manifest: None,
            include_descriptions: true,
            default_shell: None,
        }
    }
}

/// Column arithmetic for description alignment.
///
/// `reserved_columns` leaves room for the two spaces and the parentheses around
/// a description; below `min_description_width` descriptions stop being
/// aligned and take whatever room is left after the value instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_reserved_columns")]
    pub reserved_columns: usize,

    #[serde(default = "default_min_description_width")]
    pub min_description_width: usize,

    #[serde(default = "default_ellipsis")]
    pub ellipsis: String,
}

fn default_reserved_columns() -> usize {
    4
}

fn default_min_description_width() -> usize {
    8
}

fn default_ellipsis() -> String {
    "…".to_string()
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            reserved_columns: default_reserved_columns(),
            min_description_width: default_min_description_width(),
            ellipsis: default_ellipsis(),
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.reserved_columns < 4 {
            return Err(format!(
                "reserved_columns must be at least 4 to fit \"  (\" and \")\", got {}",
                self.reserved_columns
            ));
        }
        if self
            .ellipsis
            .chars()
            .any(|c| c.is_control() || matches!(c, '"' | '\'' | '\\' | '$' | '`'))
        {
            return Err(format!(
                "ellipsis {:?} contains characters that cannot be embedded in a script",
                self.ellipsis
            ));
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Completion(String),
    Layout(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Completion(msg) => write!(f, "Completion: {}", msg),
            ValidationError::Layout(msg) => write!(f, "Layout: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ShellcompConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(manifest) = &self.completion.manifest {
            if manifest.as_os_str().is_empty() {
                errors.push(ValidationError::Completion(
                    "manifest path cannot be empty".to_string(),
                ));
            }
        }
        if let Err(e) = self.layout.validate() {
            errors.push(ValidationError::Layout(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
