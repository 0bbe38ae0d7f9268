//! Error types for the simdupe library.
//!
//! Structured error types that preserve context and enable proper error
//! propagation throughout the dedupe pipeline. Per-file errors are isolated
//! and recoverable; configuration errors fail fast before any file is
//! processed.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main result type for simdupe operations.
pub type Result<T> = std::result::Result<T, SimdupeError>;

/// Comprehensive error type for all simdupe operations.
#[derive(Error, Debug)]
pub enum SimdupeError {
    /// Zero-length file content. Recovered locally: the file is routed to
    /// the degenerate empty-file bucket and never enters fingerprinting.
    #[error("Empty content{}", path_suffix(.path))]
    EmptyContent {
        /// File path, when known at the point of failure
        path: Option<PathBuf>,
    },

    /// Invalid configuration. Fatal: surfaced before any file is processed.
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// A file that could not be read. Per-file: counted and skipped, never
    /// fatal to the overall run.
    #[error("Unreadable content at {path}: {source}")]
    UnreadableContent {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// I/O related errors outside the per-file read path
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Run cancelled via the caller-supplied cancellation signal
    #[error("Run cancelled before stage '{stage}'")]
    Cancelled {
        /// Pipeline stage that was about to start
        stage: String,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error description
        message: String,
    },
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(": {}", path.display()),
        None => String::new(),
    }
}

impl SimdupeError {
    /// Create a new empty-content error without path context
    pub fn empty_content() -> Self {
        Self::EmptyContent { path: None }
    }

    /// Create a new empty-content error for a specific file
    pub fn empty_content_at(path: impl Into<PathBuf>) -> Self {
        Self::EmptyContent {
            path: Some(path.into()),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new unreadable-content error
    pub fn unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::UnreadableContent {
            path: path.into(),
            source,
        }
    }

    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new cancellation error for the named stage
    pub fn cancelled(stage: impl Into<String>) -> Self {
        Self::Cancelled {
            stage: stage.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error is isolated to a single file and recoverable
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            Self::EmptyContent { .. } | Self::UnreadableContent { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = SimdupeError::config_field("band_count must divide fingerprint_bits", "band_count");
        assert_eq!(
            err.to_string(),
            "Configuration error: band_count must divide fingerprint_bits"
        );
    }

    #[test]
    fn empty_content_display_includes_path() {
        let err = SimdupeError::empty_content_at("/tmp/zero.bin");
        assert_eq!(err.to_string(), "Empty content: /tmp/zero.bin");
        assert!(err.is_per_file());
    }

    #[test]
    fn cancelled_names_the_stage() {
        let err = SimdupeError::cancelled("score");
        assert_eq!(err.to_string(), "Run cancelled before stage 'score'");
        assert!(!err.is_per_file());
    }
}
