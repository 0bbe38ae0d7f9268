//! Directory traversal feeding the dedupe pipeline.
//!
//! The walker owns the filesystem policy the engine depends on by contract:
//! it enforces the minimum-size floor, reads file content, and isolates
//! per-file read failures. Unreadable files are counted and skipped; they
//! never abort the walk.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::errors::{Result, SimdupeError};
use crate::core::files::FileContent;

/// Result of walking a directory tree.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Files that passed the size floor and were read successfully
    pub files: Vec<FileContent>,

    /// Files skipped for being below the size floor
    pub skipped_small: usize,

    /// Files (or directory entries) that could not be read
    pub skipped_unreadable: usize,
}

/// Recursive directory walker with a minimum-size floor.
#[derive(Debug, Clone, Copy)]
pub struct FileWalker {
    min_size: u64,
}

impl FileWalker {
    /// Create a walker that skips files smaller than `min_size` bytes.
    pub fn new(min_size: u64) -> Self {
        Self { min_size }
    }

    /// Walk `root` recursively and read every regular file at or above the
    /// size floor. Fails only if `root` is not a directory; everything
    /// below that is per-file and recoverable.
    pub fn walk(&self, root: &Path) -> Result<WalkOutcome> {
        if !root.is_dir() {
            return Err(SimdupeError::io(
                format!("not a directory: {}", root.display()),
                io::Error::from(io::ErrorKind::NotFound),
            ));
        }

        let mut outcome = WalkOutcome::default();

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry: {err}");
                    outcome.skipped_unreadable += 1;
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    warn!("skipping {}: {err}", entry.path().display());
                    outcome.skipped_unreadable += 1;
                    continue;
                }
            };

            if metadata.len() < self.min_size {
                debug!("skipping {} below size floor", entry.path().display());
                outcome.skipped_small += 1;
                continue;
            }

            match fs::read(entry.path()) {
                Ok(content) => {
                    outcome
                        .files
                        .push(FileContent::new(entry.path().to_path_buf(), content));
                }
                Err(err) => {
                    let err = SimdupeError::unreadable(entry.path(), err);
                    warn!("{err}");
                    outcome.skipped_unreadable += 1;
                }
            }
        }

        debug!(
            files = outcome.files.len(),
            skipped_small = outcome.skipped_small,
            skipped_unreadable = outcome.skipped_unreadable,
            "walk complete"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn walk_collects_files_recursively() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"hello world").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/b.txt"), b"hello again").unwrap();

        let outcome = FileWalker::new(0).walk(dir.path()).unwrap();

        assert_eq!(outcome.files.len(), 2);
        assert_eq!(outcome.skipped_small, 0);
        assert_eq!(outcome.skipped_unreadable, 0);
    }

    #[test]
    fn size_floor_filters_small_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("small.txt"), b"tiny").unwrap();
        fs::write(dir.path().join("large.txt"), vec![b'x'; 64]).unwrap();

        let outcome = FileWalker::new(10).walk(dir.path()).unwrap();

        assert_eq!(outcome.files.len(), 1);
        assert_eq!(outcome.skipped_small, 1);
        assert!(outcome.files[0].path.ends_with("large.txt"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(FileWalker::new(0).walk(&missing).is_err());
    }
}
