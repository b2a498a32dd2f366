//! Recursive file enumeration
//!
//! Walks a directory tree with an explicit work list and returns every
//! non-directory entry. Order follows `read_dir` and is not sorted.
//!
//! Symbolic links are resolved: a link to a file is reported as a file, a
//! link to a directory is descended into. There is no cycle detection, so
//! a link pointing back up the tree is followed until the OS refuses the
//! path (or until `max_depth`, when set).

use crate::error::{ArchiveError, ArchiveResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Enumerates regular files under a root directory
#[derive(Debug, Clone, Default)]
pub struct DirectoryScanner {
    max_depth: Option<usize>,
}

impl DirectoryScanner {
    /// Scanner with no depth bound
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop descending below `depth` levels of subdirectories.
    ///
    /// Depth 0 lists only the root's own files.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// List every file under `root`.
    ///
    /// Fails with [`ArchiveError::DirectoryNotFound`] if `root` is missing,
    /// and with [`ArchiveError::Scan`] if any directory cannot be listed.
    /// Entries whose metadata cannot be resolved (dangling links, entries
    /// removed mid-scan) are skipped.
    pub fn scan(&self, root: &Path) -> ArchiveResult<Vec<PathBuf>> {
        if !root.exists() {
            return Err(ArchiveError::directory_not_found(root));
        }

        let mut files = Vec::new();
        let mut pending = vec![(root.to_path_buf(), 0usize)];

        while let Some((dir, depth)) = pending.pop() {
            let entries = fs::read_dir(&dir).map_err(|source| ArchiveError::Scan {
                path: dir.clone(),
                source,
            })?;

            for entry in entries {
                let entry = entry.map_err(|source| ArchiveError::Scan {
                    path: dir.clone(),
                    source,
                })?;
                let path = entry.path();

                let metadata = match fs::metadata(&path) {
                    Ok(metadata) => metadata,
                    Err(e) => {
                        debug!("Skipping unresolvable entry {}: {}", path.display(), e);
                        continue;
                    }
                };

                if metadata.is_dir() {
                    if self.max_depth.is_some_and(|max| depth >= max) {
                        warn!(
                            "Not descending into {}: depth limit {} reached",
                            path.display(),
                            depth
                        );
                        continue;
                    }
                    pending.push((path, depth + 1));
                } else {
                    files.push(path);
                }
            }
        }

        debug!("Scanned {}: {} files", root.display(), files.len());
        Ok(files)
    }
}
