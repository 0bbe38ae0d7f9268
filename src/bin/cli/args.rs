//! CLI Argument Structures and Configuration
//!
//! This module contains all CLI argument definitions, command structures,
//! and configuration enums used by the simdupe binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Near-duplicate file detection
#[derive(Parser)]
#[command(name = "simdupe")]
#[command(version = VERSION)]
#[command(about = "simdupe - Near-Duplicate File Detection")]
#[command(long_about = "
Find exact and near-duplicate files in a directory tree using SimHash
content fingerprints and locality-sensitive banding.

Common Usage:

  # Scan a directory with the defaults
  simdupe scan ./data

  # Tighter matching: at most 4 differing fingerprint bits
  simdupe scan --threshold 4 ./data

  # Express the threshold as a similarity ratio instead
  simdupe scan --similarity 0.9 ./data

  # Machine-readable output
  simdupe scan --format json ./data > report.json

  # Print the default configuration in YAML format
  simdupe print-default-config
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a directory tree for duplicate and near-duplicate files
    Scan(Box<ScanArgs>),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Validate a simdupe configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

/// Arguments for the scan command
#[derive(Args)]
pub struct ScanArgs {
    /// Directory to scan recursively
    pub directory: PathBuf,

    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum Hamming distance in bits for two files to match
    #[arg(short, long, conflicts_with = "similarity")]
    pub threshold: Option<u32>,

    /// Minimum similarity ratio in [0.0, 1.0] for two files to match
    #[arg(short, long)]
    pub similarity: Option<f64>,

    /// Skip files smaller than this many bytes
    #[arg(long)]
    pub min_size: Option<u64>,

    /// Byte-shingle window size
    #[arg(long)]
    pub shingle_size: Option<usize>,

    /// Fingerprint width in bits (multiple of 64)
    #[arg(long)]
    pub fingerprint_bits: Option<u32>,

    /// Number of LSH bands the fingerprint is split into
    #[arg(long)]
    pub bands: Option<u32>,

    /// List files that belong to no cluster
    #[arg(short, long)]
    pub unique: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the validate-config command
#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Path to the configuration file to validate
    pub config_path: PathBuf,
}

/// Report output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable console output
    Text,
    /// Pretty-printed JSON on stdout
    Json,
}
