//! Tar container writer
//!
//! Appends one entry per file to a tar stream. Small files are read in
//! full before their header is written, so a file that cannot be read is
//! dropped cleanly instead of leaving a truncated entry behind. Large
//! files are streamed with a fixed declared size.

use crate::error::{ArchiveError, ArchiveResult};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};
use std::time::UNIX_EPOCH;
use tar::{Builder, EntryType, Header};
use tracing::{debug, warn};

/// Permission bits recorded for every entry
pub const ENTRY_MODE: u32 = 0o644;

/// Archive name for `path`, relative to `root`, with `/` separators.
///
/// Backslashes are treated as separators too, so a name produced on one
/// platform reads the same everywhere.
pub fn entry_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);

    let joined = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    joined
        .replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// A file that was found but could not be archived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Source path
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// Totals for a finished archive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Entries written
    pub entries: usize,
    /// Uncompressed payload bytes across all entries
    pub payload_bytes: u64,
    /// Files that were dropped
    pub skipped: Vec<SkippedEntry>,
}

/// Files up to this size are read into memory before their header is written
pub const DEFAULT_BUFFER_LIMIT: u64 = 8 * 1024 * 1024;

/// Writes files under a root directory into a tar stream.
///
/// Files no larger than the buffer limit are read in full first, so a read
/// failure drops them without touching the stream. Larger files are
/// streamed; if one fails or shrinks mid-read its entry is zero-filled to
/// the size already declared in the header and the file is reported as
/// skipped.
pub struct ArchiveWriter<W: Write> {
    builder: Builder<W>,
    root: PathBuf,
    buffer_limit: u64,
    summary: ArchiveSummary,
}

impl<W: Write> ArchiveWriter<W> {
    /// Start an archive whose entry names are relative to `root`
    pub fn new(sink: W, root: impl Into<PathBuf>) -> Self {
        ArchiveWriter {
            builder: Builder::new(sink),
            root: root.into(),
            buffer_limit: DEFAULT_BUFFER_LIMIT,
            summary: ArchiveSummary::default(),
        }
    }

    /// Stream files larger than `bytes` instead of buffering them
    pub fn with_buffer_limit(mut self, bytes: u64) -> Self {
        self.buffer_limit = bytes;
        self
    }

    /// Append `path` as one entry.
    ///
    /// Returns `Ok(false)` when the file could not be archived intact; the
    /// failure is logged and recorded in the summary and the archive stays
    /// valid. Returns `Err` only when the sink itself fails.
    pub fn put(&mut self, path: &Path) -> ArchiveResult<bool> {
        let name = entry_name(&self.root, path);

        let (mut file, len, mtime) = match open_source(path) {
            Ok(source) => source,
            Err(e) => return Ok(self.skip(path, e.to_string())),
        };

        let mut header = Header::new_gnu();
        header.set_entry_type(EntryType::Regular);
        header.set_mode(ENTRY_MODE);
        header.set_mtime(mtime);

        let written = if len <= self.buffer_limit {
            let mut data = Vec::new();
            if let Err(e) = std::io::Read::by_ref(&mut file).take(len).read_to_end(&mut data) {
                return Ok(self.skip(path, e.to_string()));
            }
            header.set_size(data.len() as u64);
            self.builder
                .append_data(&mut header, &name, data.as_slice())
                .map_err(ArchiveError::sink)?;
            data.len() as u64
        } else {
            header.set_size(len);
            let mut source = PaddedSource::new(file, len);
            self.builder
                .append_data(&mut header, &name, &mut source)
                .map_err(ArchiveError::sink)?;
            if let Some(failure) = source.failure {
                return Ok(self.skip(path, format!("entry zero-filled: {}", failure)));
            }
            len
        };

        debug!("Archived {} ({} bytes)", name, written);
        self.summary.entries += 1;
        self.summary.payload_bytes += written;
        Ok(true)
    }

    /// Append every path in order, stopping only on a sink failure
    pub fn put_all<P: AsRef<Path>>(&mut self, paths: &[P]) -> ArchiveResult<()> {
        for path in paths {
            self.put(path.as_ref())?;
        }
        Ok(())
    }

    /// Write the tar trailer and hand back the summary and the sink
    pub fn finish(self) -> ArchiveResult<(ArchiveSummary, W)> {
        let sink = self.builder.into_inner().map_err(ArchiveError::sink)?;
        Ok((self.summary, sink))
    }

    fn skip(&mut self, path: &Path, reason: String) -> bool {
        warn!("Unable to archive {}: {}", path.display(), reason);
        self.summary.skipped.push(SkippedEntry {
            path: path.to_path_buf(),
            reason,
        });
        false
    }
}

fn open_source(path: &Path) -> io::Result<(File, u64, u64)> {
    let file = File::open(path)?;
    let metadata = file.metadata()?;
    if metadata.is_dir() {
        return Err(io::Error::new(io::ErrorKind::Other, "is a directory"));
    }

    let mtime = metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Ok((file, metadata.len(), mtime))
}

/// Yields exactly `remaining` bytes, zero-filling after a read error or
/// early end of the inner reader.
struct PaddedSource<R> {
    inner: R,
    remaining: u64,
    failure: Option<String>,
}

impl<R: Read> PaddedSource<R> {
    fn new(inner: R, len: u64) -> Self {
        PaddedSource {
            inner,
            remaining: len,
            failure: None,
        }
    }
}

impl<R: Read> Read for PaddedSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        let want = usize::try_from(self.remaining).map_or(buf.len(), |r| r.min(buf.len()));
        let buf = &mut buf[..want];

        if self.failure.is_none() {
            match self.inner.read(buf) {
                Ok(0) => {
                    self.failure = Some(format!("file ended {} bytes early", self.remaining));
                }
                Ok(n) => {
                    self.remaining -= n as u64;
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => return Err(e),
                Err(e) => self.failure = Some(e.to_string()),
            }
        }

        buf.fill(0);
        self.remaining -= want as u64;
        Ok(want)
    }
}
