//! # recpack
//!
//! Packages the artifacts of one finished recording session into a single
//! compressed archive.
//!
//! A session's producers (video encoder, observation/reward/command
//! loggers) write into a working directory described by a
//! [`RecordingSpec`]. When the session closes, every file in that
//! directory goes into a tar archive, compressed with gzip or zstd and
//! written to the spec's destination, and the working directory is
//! removed.
//!
//! ## Quick Start
//!
//! ```ignore
//! use recpack::prelude::*;
//!
//! let spec = RecordingSpec::builder("./mission.tgz")
//!     .record_mp4(30, 2_000_000)
//!     .record_rewards()
//!     .build();
//!
//! let mut session = RecordingSession::open(spec)?;
//! std::fs::write(session.rewards_path(), "1.0\n")?;
//!
//! let report = session.close()?;
//! assert!(report.is_complete());
//! ```
//!
//! Dropping an open session closes it as well; errors during that implicit
//! close are printed to stderr and never propagated.
//!
//! ## Crates
//!
//! - `recpack-core` - [`RecordingSpec`] and [`Codec`]
//! - `recpack-archive` - scanning, tar writing, compression, reading

#![warn(missing_docs)]

mod error;
mod report;
mod session;

pub mod prelude;

pub use error::{Error, Result};
pub use report::{CloseReport, Delivery};
pub use session::RecordingSession;

pub use recpack_archive::{ArchiveError, ArchiveReader, SkippedEntry};
pub use recpack_core::{Codec, RecordingSpec, RecordingSpecBuilder, SpecError};
