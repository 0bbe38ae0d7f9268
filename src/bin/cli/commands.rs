//! Command Execution Logic
//!
//! This module contains the command implementations: directory scanning,
//! configuration printing, and configuration validation.

use std::fs;
use std::path::Path;

use anyhow::Context;
use console::style;
use tracing::info;

use simdupe::core::config::{DedupeConfig, SimilarityThreshold};
use simdupe::core::pipeline::DedupePipeline;
use simdupe::io::walker::FileWalker;

use crate::cli::args::{OutputFormat, ScanArgs, ValidateConfigArgs};
use crate::cli::output;

/// Main scan command implementation
pub fn scan_command(args: ScanArgs) -> anyhow::Result<()> {
    let config = build_config(&args)?;

    // Fail fast on an invalid configuration before touching the filesystem.
    let pipeline = DedupePipeline::new(config)?;

    let walker = FileWalker::new(pipeline.config().min_size);
    let outcome = walker.walk(&args.directory)?;
    info!(
        files = outcome.files.len(),
        skipped_small = outcome.skipped_small,
        skipped_unreadable = outcome.skipped_unreadable,
        "walked {}",
        args.directory.display()
    );

    let skipped_unreadable = outcome.skipped_unreadable;
    let mut report = pipeline.run(outcome.files)?;
    report.stats.skipped_unreadable = skipped_unreadable;

    match args.format {
        OutputFormat::Text => output::render_text(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

/// Print the default configuration as YAML
pub fn print_default_config() -> anyhow::Result<()> {
    let config = DedupeConfig::default();
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}

/// Validate a configuration file and report the result
pub fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    let config = load_configuration(&args.config_path)?;
    config
        .validate()
        .with_context(|| format!("invalid configuration: {}", args.config_path.display()))?;

    println!(
        "{} {}",
        style("Configuration is valid:").green(),
        args.config_path.display()
    );
    Ok(())
}

/// Load a configuration file, or the defaults when `path` has no file.
fn load_configuration(path: &Path) -> anyhow::Result<DedupeConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("cannot read configuration file: {}", path.display()))?;
    let config: DedupeConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("cannot parse configuration file: {}", path.display()))?;
    Ok(config)
}

/// Merge the configuration file (or defaults) with command-line overrides.
fn build_config(args: &ScanArgs) -> anyhow::Result<DedupeConfig> {
    let mut config = match &args.config {
        Some(path) => load_configuration(path)?,
        None => DedupeConfig::default(),
    };

    if let Some(bits) = args.threshold {
        config.threshold = SimilarityThreshold::Bits(bits);
    }
    if let Some(ratio) = args.similarity {
        config.threshold = SimilarityThreshold::Similarity(ratio);
    }
    if let Some(min_size) = args.min_size {
        config.min_size = min_size;
    }
    if let Some(shingle_size) = args.shingle_size {
        config.shingle_size = shingle_size;
    }
    if let Some(bits) = args.fingerprint_bits {
        config.fingerprint_bits = bits;
    }
    if let Some(bands) = args.bands {
        config.band_count = bands;
    }
    if args.unique {
        config.report_unique = true;
    }

    Ok(config)
}
