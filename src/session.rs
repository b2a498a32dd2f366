//! Recording session lifecycle.
//!
//! A `RecordingSession` owns one working directory from the moment it is
//! opened until it is closed, and turns it into an archive at the
//! destination exactly once.
//!
//! ## Close Sequence
//!
//! 1. Inert or already closed: return immediately
//! 2. Scan the working directory (a missing directory is returned as an
//!    error and nothing else happens)
//! 3. If any files were found, archive and compress them to the destination
//! 4. Remove the working directory, best effort
//! 5. Mark the session closed
//!
//! Steps 3 and 4 never fail the call. A destination that cannot be written
//! is logged and reported in the [`CloseReport`], and the working
//! directory is still removed.
//!
//! ## Ownership
//!
//! Sessions are not `Clone`. [`RecordingSession::take`] moves the session
//! out and leaves the source holding the inert spec, so only one value can
//! ever run the close sequence for a directory.

use crate::error::{Error, Result};
use crate::report::{CloseReport, Delivery};
use recpack_archive::{pack, Compressor, DirectoryScanner};
use recpack_core::{Codec, RecordingSpec};
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::{debug, info, warn};

/// Owning handle over one recording session's working directory.
///
/// # Example
///
/// ```ignore
/// let spec = RecordingSpec::builder("./mission.tgz").record_rewards().build();
/// let mut session = RecordingSession::open(spec)?;
///
/// // producers write into session.working_dir() ...
///
/// let report = session.close()?;
/// println!("{}", report);
/// ```
#[derive(Debug, Default)]
pub struct RecordingSession {
    spec: RecordingSpec,
    closed: bool,
}

impl RecordingSession {
    /// Open a session.
    ///
    /// For a recording spec this creates the working directory and any
    /// missing parents. An inert spec does nothing.
    pub fn open(spec: RecordingSpec) -> Result<Self> {
        if spec.is_recording() {
            fs::create_dir_all(spec.working_dir()).map_err(|source| Error::CreateWorkingDir {
                path: spec.working_dir().to_path_buf(),
                source,
            })?;
            debug!("Opened recording session in {}", spec.working_dir().display());
        }

        Ok(RecordingSession {
            spec,
            closed: false,
        })
    }

    /// Archive the working directory to the destination and remove it.
    ///
    /// Idempotent: once a close has succeeded, later calls return a report
    /// with `performed == false`. If the working directory is missing the
    /// scan error is returned, the directory is not cleaned up, and the
    /// session stays open.
    ///
    /// A destination inside the working directory is not supported: the
    /// archive is written and then removed along with the directory.
    pub fn close(&mut self) -> Result<CloseReport> {
        if !self.spec.is_recording() || self.closed {
            return Ok(CloseReport::default());
        }

        let working_dir = self.spec.working_dir();
        if self.spec.destination().starts_with(working_dir) {
            warn!(
                "Destination {} is inside working directory {} and will be removed with it",
                self.spec.destination().display(),
                working_dir.display()
            );
        }
        let files = DirectoryScanner::new().scan(working_dir)?;

        let mut report = CloseReport {
            performed: true,
            files_found: files.len(),
            ..Default::default()
        };

        if !files.is_empty() {
            let destination = self.spec.destination();
            let compressor = Compressor::from_spec(&self.spec);
            match pack(working_dir, &files, destination, &compressor) {
                Ok(summary) => {
                    report.entries_written = summary.archive.entries;
                    report.skipped = summary.archive.skipped;
                    report.delivery = Delivery::Written {
                        compressed_bytes: summary.compressed_bytes,
                    };
                }
                Err(e) => {
                    warn!(
                        "Unable to write recording to output file {}: {}",
                        destination.display(),
                        e
                    );
                    report.delivery = Delivery::Failed {
                        reason: e.to_string(),
                    };
                }
            }
        } else {
            debug!("No files in {}, skipping archive", working_dir.display());
        }

        match fs::remove_dir_all(working_dir) {
            Ok(()) => report.working_dir_removed = true,
            Err(e) => warn!(
                "Failed to remove working directory {}: {}",
                working_dir.display(),
                e
            ),
        }

        self.closed = true;
        info!("Closed recording session: {}", report);
        Ok(report)
    }

    /// Move the session out, leaving this value inert.
    ///
    /// The returned session carries the spec and closed flag. Dropping or
    /// closing `self` afterwards does nothing.
    pub fn take(&mut self) -> RecordingSession {
        RecordingSession {
            spec: std::mem::take(&mut self.spec),
            closed: self.closed,
        }
    }

    /// Whether a close has completed
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The session's spec
    pub fn spec(&self) -> &RecordingSpec {
        &self.spec
    }

    /// Whether anything is recorded
    pub fn is_recording(&self) -> bool {
        self.spec.is_recording()
    }

    /// Working directory the producers write into
    pub fn working_dir(&self) -> &Path {
        self.spec.working_dir()
    }

    /// Archive destination
    pub fn destination(&self) -> &Path {
        self.spec.destination()
    }

    /// Whether video is recorded
    pub fn is_recording_mp4(&self) -> bool {
        self.spec.is_recording_mp4()
    }

    /// Whether observations are recorded
    pub fn is_recording_observations(&self) -> bool {
        self.spec.is_recording_observations()
    }

    /// Whether rewards are recorded
    pub fn is_recording_rewards(&self) -> bool {
        self.spec.is_recording_rewards()
    }

    /// Whether commands are recorded
    pub fn is_recording_commands(&self) -> bool {
        self.spec.is_recording_commands()
    }

    /// Video output path
    pub fn mp4_path(&self) -> &Path {
        self.spec.mp4_path()
    }

    /// Video bit rate
    pub fn mp4_bit_rate(&self) -> u64 {
        self.spec.mp4_bit_rate()
    }

    /// Video frame rate
    pub fn mp4_frames_per_second(&self) -> u32 {
        self.spec.mp4_frames_per_second()
    }

    /// Observation log path
    pub fn observations_path(&self) -> &Path {
        self.spec.observations_path()
    }

    /// Reward log path
    pub fn rewards_path(&self) -> &Path {
        self.spec.rewards_path()
    }

    /// Command log path
    pub fn commands_path(&self) -> &Path {
        self.spec.commands_path()
    }

    /// Mission initialization document path
    pub fn mission_init_path(&self) -> &Path {
        self.spec.mission_init_path()
    }

    /// Archive compression codec
    pub fn codec(&self) -> Codec {
        self.spec.codec()
    }
}

impl Drop for RecordingSession {
    fn drop(&mut self) {
        if !self.spec.is_recording() || self.closed {
            return;
        }

        // stderr only: a logging backend may already be torn down here
        match panic::catch_unwind(AssertUnwindSafe(|| self.close())) {
            Ok(Ok(report)) if !report.is_complete() => {
                eprintln!("Recording session closed with errors: {}", report);
                for skipped in &report.skipped {
                    eprintln!("  not archived: {}: {}", skipped.path.display(), skipped.reason);
                }
            }
            Ok(Ok(_)) => {}
            Ok(Err(e)) => eprintln!("Error in closing of recording session: {}", e),
            Err(_) => eprintln!("Unknown error in closing of recording session."),
        }
    }
}
