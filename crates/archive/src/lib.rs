//! Session archives
//!
//! This crate turns a recording session's working directory into a single
//! compressed archive, and reads such archives back.
//!
//! ## Archive Format
//!
//! A tar container with one regular-file entry per file found under the
//! working directory, compressed end to end with gzip (default) or zstd:
//!
//! ```text
//! mission.tgz
//! ├── missionInit.xml
//! ├── video.mp4
//! ├── rewards.txt
//! └── logs/
//!     └── observations.txt
//! ```
//!
//! Entry names are relative to the working directory and always use `/`
//! as the separator. Directories get no entry of their own.
//!
//! ## Pipeline
//!
//! 1. [`DirectoryScanner`] lists every file under the root
//! 2. [`Compressor`] opens the destination behind a compression filter
//! 3. [`ArchiveWriter`] streams one entry per file into it, skipping files
//!    that cannot be read
//! 4. [`ArchiveWriter::finish`] writes the tar trailer, then the codec
//!    trailer is flushed
//!
//! [`pack`] runs the whole pipeline.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod compressor;
mod error;
mod pack;
mod reader;
mod scanner;
mod writer;

pub use compressor::{CompressedSink, Compressor};
pub use error::{ArchiveError, ArchiveResult};
pub use pack::{pack, PackSummary};
pub use reader::{ArchiveReader, EntryInfo};
pub use scanner::DirectoryScanner;
pub use writer::{
    entry_name, ArchiveSummary, ArchiveWriter, SkippedEntry, DEFAULT_BUFFER_LIMIT, ENTRY_MODE,
};

pub use recpack_core::Codec;
