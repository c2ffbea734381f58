//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, ManifestError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Manifest(ManifestError::Read { path, source }) => {
            format!("Cannot read manifest {}: {}", path.display(), source)
        }
        other => other.to_string(),
    }
}
