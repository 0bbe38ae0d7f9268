//! SimHash fingerprinting over byte-shingled file content.
//!
//! Each file is reduced to a fixed-width bit vector by bit voting over the
//! XXH3 hashes of its shingles: bit `i` of the fingerprint is set iff the
//! majority of shingle hashes have bit `i` set. Hamming distance between two
//! fingerprints then approximates content dissimilarity: small edits flip
//! few bits, large rewrites flip many.
//!
//! The strong content digest for exact-duplicate detection also lives here;
//! the engine only depends on it being a uniform fixed-width function of the
//! raw bytes.

use std::fmt;

use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::core::errors::{Result, SimdupeError};

pub mod shingles;


pub use shingles::ShingleIter;

/// Fixed-width locality-sensitive fingerprint.
///
/// Stored as little-endian 64-bit words; bit `i` lives in word `i / 64` at
/// position `i % 64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    bits: u32,
    words: Vec<u64>,
}

impl Fingerprint {
    /// Build a fingerprint from raw words. `bits` must equal
    /// `words.len() * 64`.
    pub fn from_words(words: Vec<u64>, bits: u32) -> Self {
        debug_assert_eq!(words.len(), (bits / 64) as usize);
        Self { bits, words }
    }

    /// Fingerprint width in bits.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// The underlying words, low bits first.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Whether bit `i` is set.
    pub fn bit(&self, i: u32) -> bool {
        (self.words[(i / 64) as usize] >> (i % 64)) & 1 == 1
    }

    /// Exact Hamming distance to another fingerprint of the same width.
    /// Word-parallel popcount of the XOR.
    pub fn hamming_distance(&self, other: &Fingerprint) -> u32 {
        debug_assert_eq!(self.bits, other.bits, "fingerprint widths must match");
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }

    /// Collect the bits of one contiguous band into 64-bit chunks, low bits
    /// first. Bands of equal content always produce equal chunks.
    pub fn band_bits(&self, band: u32, band_width: u32) -> Vec<u64> {
        let start = band * band_width;
        debug_assert!(start + band_width <= self.bits);

        let mut chunks = vec![0u64; band_width.div_ceil(64) as usize];
        for i in 0..band_width {
            if self.bit(start + i) {
                chunks[(i / 64) as usize] |= 1 << (i % 64);
            }
        }
        chunks
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in self.words.iter().rev() {
            write!(f, "{word:016x}")?;
        }
        Ok(())
    }
}

/// SimHash fingerprint generator.
///
/// Fingerprints are a pure function of the shingle multiset: identical
/// content always produces identical fingerprints, and the result does not
/// depend on shingle enumeration order (bit votes commute).
#[derive(Debug, Clone)]
pub struct SimHasher {
    shingle_size: usize,
    fingerprint_bits: u32,
}

impl SimHasher {
    /// Create a generator with the given shingle window size and fingerprint
    /// width. The width must be a positive multiple of 64, which
    /// [`crate::core::config::DedupeConfig::validate`] guarantees.
    pub fn new(shingle_size: usize, fingerprint_bits: u32) -> Self {
        debug_assert!(shingle_size > 0);
        debug_assert!(fingerprint_bits > 0 && fingerprint_bits % 64 == 0);
        Self {
            shingle_size,
            fingerprint_bits,
        }
    }

    /// Shingle window size in bytes.
    pub fn shingle_size(&self) -> usize {
        self.shingle_size
    }

    /// Fingerprint width in bits.
    pub fn fingerprint_bits(&self) -> u32 {
        self.fingerprint_bits
    }

    /// Compute the SimHash fingerprint of `content`.
    ///
    /// Word `w` of the fingerprint votes on the seeded hash family
    /// `xxh3(shingle, seed = w)`, giving each word an independent uniform
    /// 64-bit hash per shingle. Fails with
    /// [`SimdupeError::EmptyContent`] for zero-length input.
    pub fn fingerprint(&self, content: &[u8]) -> Result<Fingerprint> {
        if content.is_empty() {
            return Err(SimdupeError::empty_content());
        }

        let word_count = (self.fingerprint_bits / 64) as usize;
        let mut votes = vec![0i64; self.fingerprint_bits as usize];

        for shingle in ShingleIter::new(content, self.shingle_size) {
            for word in 0..word_count {
                let hash = xxh3_64_with_seed(shingle, word as u64);
                let base = word * 64;
                for bit in 0..64 {
                    if (hash >> bit) & 1 == 1 {
                        votes[base + bit] += 1;
                    } else {
                        votes[base + bit] -= 1;
                    }
                }
            }
        }

        let mut words = vec![0u64; word_count];
        for (i, vote) in votes.iter().enumerate() {
            // Output bit is 1 iff the vote sum is non-negative.
            if *vote >= 0 {
                words[i / 64] |= 1 << (i % 64);
            }
        }

        Ok(Fingerprint::from_words(words, self.fingerprint_bits))
    }
}

/// Strong content digest for exact-duplicate detection: blake3 truncated to
/// 128 bits. Used only for exact-match short-circuiting, never for
/// clustering distance.
pub fn strong_digest(content: &[u8]) -> u128 {
    let hash = blake3::hash(content);
    let mut buf = [0u8; 16];
    buf.copy_from_slice(&hash.as_bytes()[..16]);
    u128::from_le_bytes(buf)
}
