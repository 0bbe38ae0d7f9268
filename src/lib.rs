//! # simdupe: Near-Duplicate File Detection Engine
//!
//! A similarity-fingerprinting and clustering engine for finding exact and
//! near-duplicate files in a corpus. The engine combines a strong content
//! digest (exact-duplicate detection) with SimHash locality-sensitive
//! fingerprints (near-duplicate detection), then groups matching files into
//! connected-component clusters:
//!
//! - **Shingling**: overlapping byte windows as the atomic unit of similarity
//! - **SimHash fingerprints**: fixed-width bit vectors where Hamming distance
//!   approximates content dissimilarity
//! - **LSH banding**: candidate-pair discovery without O(n²) comparison
//! - **Union-find clustering**: deterministic transitive grouping under a
//!   configurable similarity threshold
//!
//! ## Architecture
//!
//! ```text
//! Walker → Shingles → SimHash/Digest → Band Index → Scorer → Clusters → Report
//! ```
//!
//! Fingerprinting and scoring fan out across a rayon worker pool; the band
//! index is built once all fingerprints exist and is immutable afterwards;
//! union-find merges run single-threaded. Cluster membership and report
//! ordering are invariant to file-discovery order.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! use simdupe::io::walker::FileWalker;
//! use simdupe::{DedupeConfig, DedupePipeline};
//!
//! fn main() -> simdupe::Result<()> {
//!     let config = DedupeConfig::default();
//!     let walker = FileWalker::new(config.min_size);
//!     let outcome = walker.walk(Path::new("./data"))?;
//!
//!     let pipeline = DedupePipeline::new(config)?;
//!     let report = pipeline.run(outcome.files)?;
//!
//!     println!("{} duplicate clusters", report.clusters.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]

// Core engine modules
pub mod core {
    //! Configuration, error types, file records, and the staged pipeline.

    pub mod config;
    pub mod errors;
    pub mod files;
    pub mod pipeline;
}

// Similarity detection modules
pub mod detectors {
    //! Fingerprinting, candidate indexing, scoring, and clustering.

    pub mod clustering;
    pub mod lsh;
    pub mod simhash;
    pub mod similarity;
}

// I/O modules
pub mod io {
    //! Filesystem input and report assembly.

    pub mod reports;
    pub mod walker;
}

// Re-export the primary public interface
pub use crate::core::config::{DedupeConfig, SimilarityThreshold};
pub use crate::core::errors::{Result, SimdupeError};
pub use crate::core::files::{FileContent, FileRecord};
pub use crate::core::pipeline::DedupePipeline;
pub use crate::detectors::simhash::{Fingerprint, SimHasher};
pub use crate::io::reports::{ClusterRecord, DedupeReport};
