//! What a close actually did.

use recpack_archive::SkippedEntry;
use std::fmt;

/// Outcome of writing the archive to the destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Delivery {
    /// No archive was written: nothing to archive, or nothing to do
    #[default]
    NotAttempted,
    /// The archive was written
    Written {
        /// Size of the compressed destination file
        compressed_bytes: u64,
    },
    /// The destination could not be opened or written
    Failed {
        /// Error text
        reason: String,
    },
}

/// Diagnostics from [`crate::RecordingSession::close`].
///
/// A report with `performed == false` means the call was a no-op: the
/// session was inert or already closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloseReport {
    /// Whether this call ran the close sequence
    pub performed: bool,
    /// Files found in the working directory
    pub files_found: usize,
    /// Entries written to the archive
    pub entries_written: usize,
    /// Files found but left out of the archive
    pub skipped: Vec<SkippedEntry>,
    /// Destination outcome
    pub delivery: Delivery,
    /// Whether the working directory was removed
    pub working_dir_removed: bool,
}

impl CloseReport {
    /// True if every file found made it into a delivered archive
    /// (trivially true when there was nothing to archive).
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && !matches!(self.delivery, Delivery::Failed { .. })
    }
}

impl fmt::Display for CloseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.performed {
            return write!(f, "nothing to do");
        }
        write!(
            f,
            "{} files found, {} archived, {} skipped; ",
            self.files_found,
            self.entries_written,
            self.skipped.len()
        )?;
        match &self.delivery {
            Delivery::NotAttempted => write!(f, "no archive written")?,
            Delivery::Written { compressed_bytes } => {
                write!(f, "archive written ({} bytes)", compressed_bytes)?
            }
            Delivery::Failed { reason } => write!(f, "archive not written: {}", reason)?,
        }
        if !self.working_dir_removed {
            write!(f, "; working directory left in place")?;
        }
        Ok(())
    }
}
