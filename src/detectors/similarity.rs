//! Exact pairwise similarity scoring for candidate pairs.
//!
//! The band index only proposes; this scorer decides. It is the single
//! source of truth for "are these two files similar": an exact Hamming
//! distance between the two fingerprints, accepted iff it is at or below
//! the resolved threshold. Deterministic, side-effect free, O(1) per pair.

use rayon::prelude::*;

use crate::detectors::lsh::CandidatePair;
use crate::detectors::simhash::Fingerprint;

/// An accepted candidate pair with its exact Hamming distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredPair {
    /// Lower fingerprint index
    pub a: u32,
    /// Higher fingerprint index
    pub b: u32,
    /// Exact Hamming distance in bits
    pub distance: u32,
}

/// Accept/reject gate over candidate pairs.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityScorer {
    threshold_bits: u32,
}

impl SimilarityScorer {
    /// Create a scorer with the given maximum allowed Hamming distance.
    pub fn new(threshold_bits: u32) -> Self {
        Self { threshold_bits }
    }

    /// The maximum allowed Hamming distance in bits.
    pub fn threshold_bits(&self) -> u32 {
        self.threshold_bits
    }

    /// Exact distance between two fingerprints if it is within the
    /// threshold, `None` otherwise.
    pub fn accept(&self, a: &Fingerprint, b: &Fingerprint) -> Option<u32> {
        let distance = a.hamming_distance(b);
        (distance <= self.threshold_bits).then_some(distance)
    }

    /// Score all candidate pairs in parallel, keeping those within the
    /// threshold.
    pub fn score(&self, pairs: &[CandidatePair], fingerprints: &[Fingerprint]) -> Vec<ScoredPair> {
        pairs
            .par_iter()
            .filter_map(|pair| {
                self.accept(
                    &fingerprints[pair.a as usize],
                    &fingerprints[pair.b as usize],
                )
                .map(|distance| ScoredPair {
                    a: pair.a,
                    b: pair.b,
                    distance,
                })
            })
            .collect()
    }
}
