//! File data carriers flowing through the pipeline.
//!
//! [`FileContent`] is what the walker delivers; [`FileRecord`] is the
//! immutable, fingerprinted form the detectors and the report operate on.
//! Both live only for the duration of one run.

use std::path::PathBuf;

use crate::detectors::simhash::Fingerprint;

/// Raw file content delivered by the walker.
#[derive(Debug, Clone)]
pub struct FileContent {
    /// File path as discovered by the walker
    pub path: PathBuf,

    /// Content length in bytes
    pub size: u64,

    /// Raw byte content
    pub content: Vec<u8>,
}

impl FileContent {
    /// Create a new record from a path and its raw content.
    pub fn new(path: impl Into<PathBuf>, content: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            size: content.len() as u64,
            content,
        }
    }

    /// Whether the content is zero-length.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A fingerprinted file. Immutable after the fingerprint stage.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// File path
    pub path: PathBuf,

    /// File size in bytes
    pub size: u64,

    /// Strong content digest for exact-duplicate detection
    pub strong_digest: u128,

    /// SimHash fingerprint of the content
    pub fingerprint: Fingerprint,
}

impl FileRecord {
    /// The strong digest rendered as lowercase hex.
    pub fn digest_hex(&self) -> String {
        format!("{:032x}", self.strong_digest)
    }
}
