//! Error types for the shell completion engine and script compiler.

use std::path::PathBuf;
use thiserror::Error;

/// Faults raised while resolving a single completion request.
///
/// None of these ever reach the shell: the resolver folds them into an
/// `ERROR` answer and logs them.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Completion callback for '{command}' failed: {message}")]
    CallbackFailed { command: String, message: String },

    #[error("Completion callback for '{command}' panicked: {message}")]
    CallbackPanicked { command: String, message: String },
}

/// Errors loading or validating a command-tree manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid manifest: {0}")]
    Invalid(String),
}

/// Top-level error surfaced by the library entry points and the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Unsupported shell: {0} (expected bash, zsh, fish or powershell)")]
    UnsupportedShell(String),

    #[error("No manifest configured. Pass --manifest or set completion.manifest in the config file.")]
    ManifestNotConfigured,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
