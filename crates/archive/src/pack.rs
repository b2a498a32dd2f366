//! One-pass archive delivery

use crate::compressor::Compressor;
use crate::error::{ArchiveError, ArchiveResult};
use crate::writer::{ArchiveSummary, ArchiveWriter};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of a delivered archive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackSummary {
    /// Container totals, including skipped files
    pub archive: ArchiveSummary,
    /// Size of the compressed file at the destination
    pub compressed_bytes: u64,
}

/// Archive `files` (all under `root`) into `destination`.
///
/// The destination is opened first and the container is streamed through
/// the compressor, so nothing is buffered beyond a single file. Unreadable
/// files are skipped and listed in the summary. Any failure of the
/// destination itself is returned; the destination may then hold a
/// truncated stream.
pub fn pack(
    root: &Path,
    files: &[PathBuf],
    destination: &Path,
    compressor: &Compressor,
) -> ArchiveResult<PackSummary> {
    let sink = compressor.create(destination)?;

    let mut writer = ArchiveWriter::new(sink, root);
    writer.put_all(files)?;
    let (archive, sink) = writer.finish()?;

    let buffered = sink.finish().map_err(ArchiveError::sink)?;
    let mut file = buffered
        .into_inner()
        .map_err(|e| ArchiveError::sink(e.into_error()))?;
    file.flush().map_err(ArchiveError::sink)?;
    let compressed_bytes = file.metadata()?.len();

    info!(
        "Wrote {} ({} entries, {} skipped, {} -> {} bytes, {})",
        destination.display(),
        archive.entries,
        archive.skipped.len(),
        archive.payload_bytes,
        compressed_bytes,
        compressor.codec()
    );

    Ok(PackSummary {
        archive,
        compressed_bytes,
    })
}
