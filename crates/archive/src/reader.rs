//! Archive reader
//!
//! Reads gzip- or zstd-compressed tar archives produced by the writer.
//! The codec is detected from the stream's magic bytes.

use crate::error::{ArchiveError, ArchiveResult};
use recpack_core::Codec;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tar::Archive;

/// Name and size of one archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Entry name (`/`-separated, relative)
    pub name: String,
    /// Uncompressed size in bytes
    pub size: u64,
}

/// Reader for session archives
pub struct ArchiveReader;

impl ArchiveReader {
    /// Codec of the archive at `path`
    pub fn detect_codec(path: &Path) -> ArchiveResult<Codec> {
        let mut reader = BufReader::new(File::open(path)?);
        Codec::detect(reader.fill_buf()?).ok_or(ArchiveError::UnknownCodec)
    }

    /// Read every entry into memory, keyed by entry name
    pub fn read_all(path: &Path) -> ArchiveResult<BTreeMap<String, Vec<u8>>> {
        let reader = BufReader::new(File::open(path)?);
        Self::collect_entries(reader)
    }

    /// Read every entry from an in-memory archive
    pub fn read_all_from_bytes(data: &[u8]) -> ArchiveResult<BTreeMap<String, Vec<u8>>> {
        Self::collect_entries(data)
    }

    /// List entry names and sizes without keeping contents
    pub fn list(path: &Path) -> ArchiveResult<Vec<EntryInfo>> {
        let reader = BufReader::new(File::open(path)?);
        let mut archive = Archive::new(Self::decoder(reader)?);
        let mut infos = Vec::new();

        for entry in archive.entries().map_err(|e| ArchiveError::corrupt(e.to_string()))? {
            let entry = entry.map_err(|e| ArchiveError::corrupt(e.to_string()))?;
            let name = entry
                .path()
                .map_err(|e| ArchiveError::corrupt(e.to_string()))?
                .to_string_lossy()
                .to_string();
            infos.push(EntryInfo {
                name,
                size: entry.size(),
            });
        }

        Ok(infos)
    }

    fn collect_entries<'a, R: BufRead + 'a>(
        reader: R,
    ) -> ArchiveResult<BTreeMap<String, Vec<u8>>> {
        let mut archive = Archive::new(Self::decoder(reader)?);
        let mut files = BTreeMap::new();

        for entry in archive.entries().map_err(|e| ArchiveError::corrupt(e.to_string()))? {
            let mut entry = entry.map_err(|e| ArchiveError::corrupt(e.to_string()))?;
            let name = entry
                .path()
                .map_err(|e| ArchiveError::corrupt(e.to_string()))?
                .to_string_lossy()
                .to_string();

            let mut data = Vec::new();
            entry
                .read_to_end(&mut data)
                .map_err(|e| ArchiveError::corrupt(format!("read {}: {}", name, e)))?;
            files.insert(name, data);
        }

        Ok(files)
    }

    fn decoder<'a, R: BufRead + 'a>(mut reader: R) -> ArchiveResult<Box<dyn Read + 'a>> {
        let codec = Codec::detect(reader.fill_buf()?).ok_or(ArchiveError::UnknownCodec)?;
        match codec {
            Codec::Gzip => Ok(Box::new(flate2::bufread::GzDecoder::new(reader))),
            Codec::Zstd => {
                let decoder = zstd::Decoder::with_buffer(reader)
                    .map_err(|e| ArchiveError::compression(format!("zstd decode: {}", e)))?;
                Ok(Box::new(decoder))
            }
        }
    }
}
