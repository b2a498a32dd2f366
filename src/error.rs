//! Unified error types for recpack.
//!
//! Only the failures a caller has to act on surface here: the working
//! directory could not be created, or it could not be scanned at close.
//! Everything else (unreadable files, an unwritable destination) is
//! reported through [`crate::CloseReport`] instead.

use recpack_archive::ArchiveError;
use std::path::PathBuf;
use thiserror::Error;

/// All recpack errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The working directory could not be created when the session opened
    #[error("failed to create working directory {}: {source}", path.display())]
    CreateWorkingDir {
        /// Directory that was being created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Scanning the working directory at close failed
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// Result type for recpack operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if the working directory was missing at close.
    pub fn is_directory_not_found(&self) -> bool {
        matches!(self, Error::Archive(e) if e.is_directory_not_found())
    }
}
