//! Errors raised while loading a recording spec

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load a [`crate::RecordingSpec`] from configuration
#[derive(Debug, Error)]
pub enum SpecError {
    /// The spec file could not be read
    #[error("failed to read spec {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The spec document is not valid JSON for a RecordingSpec
    #[error("invalid spec: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for spec loading
pub type SpecResult<T> = std::result::Result<T, SpecError>;
