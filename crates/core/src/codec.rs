//! Archive compression codecs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gzip member header magic
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Zstandard frame magic (little-endian 0xFD2FB528)
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xb5, 0x2f, 0xfd];

/// Compression applied to the archive before it reaches the destination.
///
/// `Gzip` produces the `.tgz` layout external tooling expects and is the
/// default. `Zstd` trades compatibility for speed on large video artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// gzip (RFC 1952)
    #[default]
    Gzip,
    /// Zstandard
    Zstd,
}

impl Codec {
    /// Conventional file extension for an archive compressed with this codec
    pub fn extension(&self) -> &'static str {
        match self {
            Codec::Gzip => "tar.gz",
            Codec::Zstd => "tar.zst",
        }
    }

    /// Identify the codec from the leading bytes of a compressed stream
    pub fn detect(bytes: &[u8]) -> Option<Codec> {
        if bytes.starts_with(&ZSTD_MAGIC) {
            Some(Codec::Zstd)
        } else if bytes.starts_with(&GZIP_MAGIC) {
            Some(Codec::Gzip)
        } else {
            None
        }
    }

    /// Lowercase name used in configuration and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Codec::Gzip => "gzip",
            Codec::Zstd => "zstd",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Codec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gzip" | "gz" => Ok(Codec::Gzip),
            "zstd" | "zst" => Ok(Codec::Zstd),
            other => Err(format!("unknown codec: {}", other)),
        }
    }
}
