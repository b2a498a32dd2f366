//! Recording session lifecycle tests
//!
//! Exercises the public session API end to end against a real filesystem:
//! - lifecycle: round trip, idempotent close, empty working directory
//! - ownership: moves, `take`, implicit close on drop
//! - failures: inert specs, scan failures, unreadable files, bad destinations

mod lifecycle;
mod ownership;

pub use recpack::prelude::*;
pub use recpack::ArchiveReader;
pub use std::collections::BTreeMap;
pub use std::fs;
pub use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// Paths for one test session inside a temp directory
pub struct Fixture {
    pub dir: TempDir,
    pub working_dir: PathBuf,
    pub destination: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let working_dir = dir.path().join("work");
        let destination = dir.path().join("mission.tgz");
        Fixture {
            dir,
            working_dir,
            destination,
        }
    }

    pub fn spec(&self) -> RecordingSpec {
        RecordingSpec::builder(&self.destination)
            .working_dir(&self.working_dir)
            .build()
    }

    pub fn open(&self) -> RecordingSession {
        RecordingSession::open(self.spec()).unwrap()
    }

    pub fn write(&self, relative: &str, data: &[u8]) {
        let path = self.working_dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, data).unwrap();
    }

    pub fn archive(&self) -> BTreeMap<String, Vec<u8>> {
        ArchiveReader::read_all(&self.destination).unwrap()
    }

    /// Everything under the temp dir, relative to it, for before/after comparisons
    pub fn snapshot(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        let mut pending = vec![self.dir.path().to_path_buf()];
        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                out.push(path.strip_prefix(self.dir.path()).unwrap().to_path_buf());
                if path.is_dir() {
                    pending.push(path);
                }
            }
        }
        out.sort();
        out
    }
}
