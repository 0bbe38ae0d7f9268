//! LSH banding index for candidate-pair discovery.
//!
//! Each fingerprint is split into `B` contiguous bands of `N/B` bits; two
//! files become a candidate pair if they share an identical value in at
//! least one corresponding band. This reduces pairwise discovery from
//! O(n²) to near-linear: files within a small Hamming distance agree on at
//! least one band with high probability, while unrelated files rarely do.
//!
//! The bucket map is built once all fingerprints exist and is immutable
//! afterwards; candidate derivation shards over buckets in parallel.
//! Candidates may contain false positives (removed by exact scoring) but
//! never miss a pair that agrees on a band.

use std::hash::{Hash, Hasher};

use ahash::{AHashMap, AHashSet, AHasher};
use rayon::prelude::*;
use tracing::debug;

use crate::detectors::simhash::Fingerprint;

/// A pair of fingerprint indices proposed as possibly similar, ordered so
/// that `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidatePair {
    /// Lower fingerprint index
    pub a: u32,
    /// Higher fingerprint index
    pub b: u32,
}

impl CandidatePair {
    /// Create an ordered pair from two distinct indices.
    pub fn new(a: u32, b: u32) -> Self {
        debug_assert_ne!(a, b);
        if a < b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }
}

/// Immutable band index over a set of fingerprints.
///
/// Band values wider than 64 bits are keyed by an ahash of the band bits;
/// equal bands always produce equal keys, so hashing only ever adds false
/// positives, never false negatives.
#[derive(Debug)]
pub struct BandIndex {
    band_count: u32,
    band_width: u32,
    buckets: AHashMap<(u32, u64), Vec<u32>>,
}

impl BandIndex {
    /// Build the index from all fingerprints. `band_count` must evenly
    /// divide `fingerprint_bits`, which configuration validation guarantees.
    pub fn build(fingerprints: &[Fingerprint], band_count: u32, fingerprint_bits: u32) -> Self {
        debug_assert!(band_count > 0 && fingerprint_bits % band_count == 0);
        let band_width = fingerprint_bits / band_count;

        let mut buckets: AHashMap<(u32, u64), Vec<u32>> =
            AHashMap::with_capacity(fingerprints.len() * band_count as usize);

        for (index, fingerprint) in fingerprints.iter().enumerate() {
            debug_assert_eq!(fingerprint.bits(), fingerprint_bits);
            for band in 0..band_count {
                let key = hash_band(&fingerprint.band_bits(band, band_width));
                buckets.entry((band, key)).or_default().push(index as u32);
            }
        }

        debug!(
            fingerprints = fingerprints.len(),
            bands = band_count,
            buckets = buckets.len(),
            "band index built"
        );

        Self {
            band_count,
            band_width,
            buckets,
        }
    }

    /// Number of LSH bands.
    pub fn band_count(&self) -> u32 {
        self.band_count
    }

    /// Width of one band in bits.
    pub fn band_width(&self) -> u32 {
        self.band_width
    }

    /// Number of distinct band buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Derive the deduplicated candidate-pair set: every unordered pair of
    /// indices that shares at least one bucket, each reported once.
    ///
    /// Bucket expansion shards in parallel; the result is sorted so
    /// downstream processing order is deterministic.
    pub fn candidate_pairs(&self) -> Vec<CandidatePair> {
        let multi_member: Vec<&Vec<u32>> = self
            .buckets
            .values()
            .filter(|members| members.len() > 1)
            .collect();

        let pairs: AHashSet<CandidatePair> = multi_member
            .par_iter()
            .map(|members| {
                let mut local = AHashSet::with_capacity(members.len());
                for (i, &a) in members.iter().enumerate() {
                    for &b in &members[i + 1..] {
                        local.insert(CandidatePair::new(a, b));
                    }
                }
                local
            })
            .reduce(AHashSet::new, |mut merged, local| {
                merged.extend(local);
                merged
            });

        let mut pairs: Vec<CandidatePair> = pairs.into_iter().collect();
        pairs.sort_unstable();
        pairs
    }
}

fn hash_band(chunks: &[u64]) -> u64 {
    let mut hasher = AHasher::default();
    chunks.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests;
