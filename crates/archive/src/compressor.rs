//! Compression filter for archive output

use crate::error::{ArchiveError, ArchiveResult};
use flate2::write::GzEncoder;
use recpack_core::{Codec, RecordingSpec};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// A writer that compresses everything written to it.
///
/// Call [`CompressedSink::finish`] to write the codec trailer; dropping the
/// sink without finishing leaves a truncated stream.
pub enum CompressedSink<W: Write> {
    /// gzip encoder
    Gzip(GzEncoder<W>),
    /// zstd encoder
    Zstd(zstd::Encoder<'static, W>),
}

impl<W: Write> CompressedSink<W> {
    /// Flush the codec trailer and return the inner writer
    pub fn finish(self) -> io::Result<W> {
        match self {
            CompressedSink::Gzip(encoder) => encoder.finish(),
            CompressedSink::Zstd(encoder) => encoder.finish(),
        }
    }
}

impl<W: Write> Write for CompressedSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            CompressedSink::Gzip(encoder) => encoder.write(buf),
            CompressedSink::Zstd(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            CompressedSink::Gzip(encoder) => encoder.flush(),
            CompressedSink::Zstd(encoder) => encoder.flush(),
        }
    }
}

/// Opens compressed sinks for a codec and level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Compressor {
    codec: Codec,
    level: Option<i32>,
}

impl Compressor {
    /// Compressor for `codec` at its default level
    pub fn new(codec: Codec) -> Self {
        Compressor { codec, level: None }
    }

    /// Compressor configured by a recording spec
    pub fn from_spec(spec: &RecordingSpec) -> Self {
        Compressor {
            codec: spec.codec(),
            level: spec.compression_level(),
        }
    }

    /// Override the compression level.
    ///
    /// gzip clamps to 0..=9; zstd accepts its native range.
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    /// Configured codec
    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// Wrap `inner` in a compression filter
    pub fn wrap<W: Write>(&self, inner: W) -> ArchiveResult<CompressedSink<W>> {
        match self.codec {
            Codec::Gzip => {
                let level = match self.level {
                    Some(level) => flate2::Compression::new(level.clamp(0, 9) as u32),
                    None => flate2::Compression::default(),
                };
                Ok(CompressedSink::Gzip(GzEncoder::new(inner, level)))
            }
            Codec::Zstd => {
                let level = self.level.unwrap_or(zstd::DEFAULT_COMPRESSION_LEVEL);
                let encoder = zstd::Encoder::new(inner, level)
                    .map_err(|e| ArchiveError::compression(format!("zstd encoder: {}", e)))?;
                Ok(CompressedSink::Zstd(encoder))
            }
        }
    }

    /// Create (or truncate) `destination` and wrap it in a compression filter
    pub fn create(&self, destination: &Path) -> ArchiveResult<CompressedSink<BufWriter<File>>> {
        let file = File::create(destination).map_err(|source| ArchiveError::Destination {
            path: destination.to_path_buf(),
            source,
        })?;
        self.wrap(BufWriter::new(file))
    }
}
