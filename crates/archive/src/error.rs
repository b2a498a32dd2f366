//! Archive error types

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from scanning, writing, compressing or reading archives
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The directory to scan does not exist
    #[error("directory not found: {}", path.display())]
    DirectoryNotFound {
        /// Directory that was expected
        path: PathBuf,
    },

    /// A directory under the scan root could not be listed
    #[error("failed to scan {}: {source}", path.display())]
    Scan {
        /// Directory being listed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The destination could not be opened for writing
    #[error("unable to open destination {}: {source}", path.display())]
    Destination {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing to the archive sink failed
    #[error("archive sink write failed: {0}")]
    Sink(#[source] io::Error),

    /// Compression codec setup failed
    #[error("compression error: {0}")]
    Compression(String),

    /// The stream is neither gzip nor zstd
    #[error("unrecognized archive compression")]
    UnknownCodec,

    /// The container could not be decoded
    #[error("corrupt archive: {0}")]
    Corrupt(String),

    /// Other I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ArchiveError {
    /// Create a directory-not-found error
    pub fn directory_not_found(path: &Path) -> Self {
        ArchiveError::DirectoryNotFound {
            path: path.to_path_buf(),
        }
    }

    /// Create a sink error
    pub fn sink(source: io::Error) -> Self {
        ArchiveError::Sink(source)
    }

    /// Create a compression error
    pub fn compression(msg: impl Into<String>) -> Self {
        ArchiveError::Compression(msg.into())
    }

    /// Create a corrupt-archive error
    pub fn corrupt(msg: impl Into<String>) -> Self {
        ArchiveError::Corrupt(msg.into())
    }

    /// True if the scan root was missing
    pub fn is_directory_not_found(&self) -> bool {
        matches!(self, ArchiveError::DirectoryNotFound { .. })
    }
}

/// Result type for archive operations
pub type ArchiveResult<T> = std::result::Result<T, ArchiveError>;
