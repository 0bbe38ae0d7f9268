//! Configuration types for the dedupe engine.
//!
//! All values here are consumed by [`crate::core::pipeline::DedupePipeline`]
//! after a fail-fast [`DedupeConfig::validate`] pass; flag parsing and config
//! file discovery live in the surrounding tool, not in the engine.

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, SimdupeError};

/// Maximum supported fingerprint width in bits.
pub const MAX_FINGERPRINT_BITS: u32 = 512;

/// Similarity cutoff, either as an absolute Hamming distance or as a
/// normalized similarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SimilarityThreshold {
    /// Maximum allowed Hamming distance in bits (0..=fingerprint width).
    Bits(u32),

    /// Normalized similarity in `[0.0, 1.0]`; `1.0` means identical.
    /// Resolves to `round((1 - s) * fingerprint_bits)` allowed bits.
    Similarity(f64),
}

impl SimilarityThreshold {
    /// Resolve the threshold to an allowed Hamming distance in bits for the
    /// given fingerprint width.
    pub fn resolve(&self, fingerprint_bits: u32) -> Result<u32> {
        match *self {
            Self::Bits(bits) => {
                if bits > fingerprint_bits {
                    return Err(SimdupeError::config_field(
                        format!(
                            "threshold of {bits} bits exceeds fingerprint width of {fingerprint_bits} bits"
                        ),
                        "threshold",
                    ));
                }
                Ok(bits)
            }
            Self::Similarity(similarity) => {
                if !(0.0..=1.0).contains(&similarity) {
                    return Err(SimdupeError::config_field(
                        format!("normalized threshold {similarity} must be between 0.0 and 1.0"),
                        "threshold",
                    ));
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                Ok(((1.0 - similarity) * f64::from(fingerprint_bits)).round() as u32)
            }
        }
    }
}

impl Default for SimilarityThreshold {
    fn default() -> Self {
        Self::Bits(DedupeConfig::DEFAULT_THRESHOLD_BITS)
    }
}

/// Configuration surface consumed by the dedupe engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedupeConfig {
    /// Similarity cutoff; candidate pairs at or below the resolved Hamming
    /// distance are merged into the same cluster
    #[serde(default)]
    pub threshold: SimilarityThreshold,

    /// Minimum file size in bytes; smaller files are skipped by the walker
    /// before they reach the engine
    #[serde(default = "DedupeConfig::default_min_size")]
    pub min_size: u64,

    /// Shingle window size in bytes
    #[serde(default = "DedupeConfig::default_shingle_size")]
    pub shingle_size: usize,

    /// Fingerprint width in bits; must be a positive multiple of 64
    #[serde(default = "DedupeConfig::default_fingerprint_bits")]
    pub fingerprint_bits: u32,

    /// Number of LSH bands; must evenly divide `fingerprint_bits`
    #[serde(default = "DedupeConfig::default_band_count")]
    pub band_count: u32,

    /// Also report files that belong to no cluster
    #[serde(default)]
    pub report_unique: bool,
}

impl Default for DedupeConfig {
    fn default() -> Self {
        Self {
            threshold: SimilarityThreshold::default(),
            min_size: Self::default_min_size(),
            shingle_size: Self::default_shingle_size(),
            fingerprint_bits: Self::default_fingerprint_bits(),
            band_count: Self::default_band_count(),
            report_unique: false,
        }
    }
}

/// Default value providers for [`DedupeConfig`].
impl DedupeConfig {
    /// Default allowed Hamming distance in bits.
    pub const DEFAULT_THRESHOLD_BITS: u32 = 8;

    fn default_min_size() -> u64 {
        1024
    }

    fn default_shingle_size() -> usize {
        7
    }

    fn default_fingerprint_bits() -> u32 {
        64
    }

    fn default_band_count() -> u32 {
        4
    }
}

/// Validation for [`DedupeConfig`].
impl DedupeConfig {
    /// Validate the configuration. Fails fast with a descriptive message
    /// before any file is processed.
    pub fn validate(&self) -> Result<()> {
        validate_positive_usize(self.shingle_size, "shingle_size")?;
        validate_positive_u32(self.fingerprint_bits, "fingerprint_bits")?;
        validate_positive_u32(self.band_count, "band_count")?;

        if self.fingerprint_bits % 64 != 0 || self.fingerprint_bits > MAX_FINGERPRINT_BITS {
            return Err(SimdupeError::config_field(
                format!(
                    "fingerprint_bits must be a multiple of 64 up to {MAX_FINGERPRINT_BITS}, got {}",
                    self.fingerprint_bits
                ),
                "fingerprint_bits",
            ));
        }

        if self.fingerprint_bits % self.band_count != 0 {
            return Err(SimdupeError::config_field(
                format!(
                    "band_count {} does not evenly divide fingerprint_bits {}",
                    self.band_count, self.fingerprint_bits
                ),
                "band_count",
            ));
        }

        self.threshold.resolve(self.fingerprint_bits)?;

        Ok(())
    }

    /// The resolved similarity threshold as a Hamming distance in bits.
    pub fn threshold_bits(&self) -> Result<u32> {
        self.threshold.resolve(self.fingerprint_bits)
    }

    /// Width of one LSH band in bits.
    pub fn band_width(&self) -> u32 {
        self.fingerprint_bits / self.band_count
    }
}

/// Validate that a usize value is greater than zero.
pub fn validate_positive_usize(value: usize, field: &str) -> Result<()> {
    if value == 0 {
        return Err(SimdupeError::config_field(
            format!("{field} must be greater than 0"),
            field,
        ));
    }
    Ok(())
}

/// Validate that a u32 value is greater than zero.
pub fn validate_positive_u32(value: u32, field: &str) -> Result<()> {
    if value == 0 {
        return Err(SimdupeError::config_field(
            format!("{field} must be greater than 0"),
            field,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DedupeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.band_width(), 16);
        assert_eq!(config.threshold_bits().unwrap(), 8);
    }

    #[test]
    fn band_count_must_divide_fingerprint_bits() {
        let config = DedupeConfig {
            band_count: 5,
            ..DedupeConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SimdupeError::Config { .. }));
        assert!(err.to_string().contains("does not evenly divide"));
    }

    #[test]
    fn fingerprint_bits_must_be_word_aligned() {
        let config = DedupeConfig {
            fingerprint_bits: 96,
            band_count: 4,
            ..DedupeConfig::default()
        };
        assert!(config.validate().is_err());

        let config = DedupeConfig {
            fingerprint_bits: 128,
            band_count: 4,
            ..DedupeConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.band_width(), 32);
    }

    #[test]
    fn threshold_cannot_exceed_fingerprint_width() {
        let config = DedupeConfig {
            threshold: SimilarityThreshold::Bits(65),
            ..DedupeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn normalized_threshold_resolves_to_bits() {
        assert_eq!(
            SimilarityThreshold::Similarity(1.0).resolve(64).unwrap(),
            0
        );
        assert_eq!(
            SimilarityThreshold::Similarity(0.875).resolve(64).unwrap(),
            8
        );
        assert_eq!(
            SimilarityThreshold::Similarity(0.0).resolve(64).unwrap(),
            64
        );
        assert!(SimilarityThreshold::Similarity(1.5).resolve(64).is_err());
    }

    #[test]
    fn threshold_deserializes_from_int_or_float() {
        let bits: SimilarityThreshold = serde_yaml::from_str("8").unwrap();
        assert_eq!(bits, SimilarityThreshold::Bits(8));

        let similarity: SimilarityThreshold = serde_yaml::from_str("0.9").unwrap();
        assert_eq!(similarity, SimilarityThreshold::Similarity(0.9));
    }

    #[test]
    fn config_round_trips_through_yaml() {
        let config = DedupeConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: DedupeConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
