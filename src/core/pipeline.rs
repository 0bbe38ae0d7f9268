//! Staged execution of the dedupe engine.
//!
//! The pipeline runs one corpus through seven stages:
//!
//! 1. Partition zero-length files into the degenerate empty bucket
//! 2. Strong digests in parallel, grouped by identical content
//! 3. SimHash fingerprints, one per unique content, in parallel
//! 4. Band index construction (after the fingerprint fan-in barrier)
//! 5. Candidate generation and exact scoring in parallel
//! 6. Single-threaded union-find merges (exact groups first, then
//!    accepted pairs)
//! 7. Report assembly
//!
//! Exact-duplicate files share a strong digest and are unioned directly,
//! bypassing banding entirely, so the exact-match case is correct
//! regardless of banding granularity. A caller-supplied cancellation
//! signal is honored between stages; the engine performs no I/O of its
//! own.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use ahash::AHashMap;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::core::config::DedupeConfig;
use crate::core::errors::{Result, SimdupeError};
use crate::core::files::{FileContent, FileRecord};
use crate::detectors::clustering::ClusterBuilder;
use crate::detectors::lsh::BandIndex;
use crate::detectors::simhash::{strong_digest, Fingerprint, SimHasher};
use crate::detectors::similarity::SimilarityScorer;
use crate::io::reports::{ClusterMember, DedupeReport, ReportAssembler, ReportStats};

/// The similarity-fingerprinting and clustering engine.
#[derive(Debug)]
pub struct DedupePipeline {
    config: DedupeConfig,
    threshold_bits: u32,
    hasher: SimHasher,
}

impl DedupePipeline {
    /// Create a pipeline, validating the configuration up front. No file
    /// is processed if the configuration is invalid.
    pub fn new(config: DedupeConfig) -> Result<Self> {
        config.validate()?;
        let threshold_bits = config.threshold_bits()?;
        let hasher = SimHasher::new(config.shingle_size, config.fingerprint_bits);
        Ok(Self {
            config,
            threshold_bits,
            hasher,
        })
    }

    /// The validated configuration this pipeline runs with.
    pub fn config(&self) -> &DedupeConfig {
        &self.config
    }

    /// Run the engine over one corpus without external cancellation.
    pub fn run(&self, files: Vec<FileContent>) -> Result<DedupeReport> {
        self.run_with_cancel(files, &AtomicBool::new(false))
    }

    /// Run the engine over one corpus. `cancel` is checked between stages;
    /// once set, the run fails with [`SimdupeError::Cancelled`].
    pub fn run_with_cancel(
        &self,
        files: Vec<FileContent>,
        cancel: &AtomicBool,
    ) -> Result<DedupeReport> {
        let run_start = Instant::now();
        let files_scanned = files.len();

        // Stage 1: zero-length content goes to the degenerate bucket and
        // never enters fingerprinting.
        let (content, empty): (Vec<FileContent>, Vec<FileContent>) =
            files.into_iter().partition(|file| !file.is_empty());
        if !empty.is_empty() {
            debug!(count = empty.len(), "routed empty files to the degenerate bucket");
        }
        check_cancel(cancel, "digest")?;

        // Stage 2: strong digests in parallel, then group identical content.
        let stage_start = Instant::now();
        let digests: Vec<u128> = content
            .par_iter()
            .map(|file| strong_digest(&file.content))
            .collect();

        let mut digest_groups: AHashMap<u128, Vec<usize>> = AHashMap::with_capacity(content.len());
        for (index, digest) in digests.iter().enumerate() {
            digest_groups.entry(*digest).or_default().push(index);
        }

        // One representative per unique content, chosen in file order so
        // the representative set is deterministic.
        let mut slot_of_digest: AHashMap<u128, usize> = AHashMap::with_capacity(digest_groups.len());
        let mut representatives: Vec<usize> = Vec::with_capacity(digest_groups.len());
        for (index, digest) in digests.iter().enumerate() {
            if !slot_of_digest.contains_key(digest) {
                slot_of_digest.insert(*digest, representatives.len());
                representatives.push(index);
            }
        }
        debug!(
            files = content.len(),
            unique = representatives.len(),
            elapsed_ms = stage_start.elapsed().as_millis() as u64,
            "digest stage complete"
        );
        check_cancel(cancel, "fingerprint")?;

        // Stage 3: fingerprint one representative per unique content.
        // Identical content always yields the identical fingerprint, so
        // duplicates inherit their representative's fingerprint.
        let stage_start = Instant::now();
        let fingerprints: Vec<Fingerprint> = representatives
            .par_iter()
            .map(|&index| self.hasher.fingerprint(&content[index].content))
            .collect::<Result<Vec<_>>>()?;

        let records: Vec<FileRecord> = content
            .iter()
            .zip(&digests)
            .map(|(file, digest)| FileRecord {
                path: file.path.clone(),
                size: file.size,
                strong_digest: *digest,
                fingerprint: fingerprints[slot_of_digest[digest]].clone(),
            })
            .collect();
        debug!(
            fingerprints = fingerprints.len(),
            elapsed_ms = stage_start.elapsed().as_millis() as u64,
            "fingerprint stage complete"
        );
        check_cancel(cancel, "index")?;

        // Stage 4: band index over the unique fingerprints. All
        // fingerprints exist at this point; the index is immutable once
        // built.
        let stage_start = Instant::now();
        let index = BandIndex::build(
            &fingerprints,
            self.config.band_count,
            self.config.fingerprint_bits,
        );
        let candidates = index.candidate_pairs();
        debug!(
            candidates = candidates.len(),
            buckets = index.bucket_count(),
            elapsed_ms = stage_start.elapsed().as_millis() as u64,
            "index stage complete"
        );
        check_cancel(cancel, "score")?;

        // Stage 5: exact scoring decides; the bander only proposed.
        let scorer = SimilarityScorer::new(self.threshold_bits);
        let accepted = scorer.score(&candidates, &fingerprints);
        check_cancel(cancel, "cluster")?;

        // Stage 6: union-find merges, single-threaded. Exact-digest groups
        // first (correct regardless of banding), then accepted pairs mapped
        // back from representative slots to file indices.
        let mut builder = ClusterBuilder::new(records.len());
        for members in digest_groups.values() {
            builder.union_group(members);
        }
        for pair in &accepted {
            builder.union(
                representatives[pair.a as usize],
                representatives[pair.b as usize],
            );
        }
        let components = builder.into_components();
        check_cancel(cancel, "report")?;

        // Stage 7: assemble the deterministic report.
        let empty_members: Vec<ClusterMember> = empty
            .iter()
            .map(|file| ClusterMember {
                path: file.path.display().to_string(),
                size: 0,
                strong_digest: format!("{:032x}", strong_digest(&[])),
            })
            .collect();

        let stats = ReportStats {
            files_scanned,
            files_fingerprinted: records.len(),
            unique_contents: representatives.len(),
            candidate_pairs: candidates.len(),
            accepted_pairs: accepted.len(),
            skipped_unreadable: 0,
        };

        let report = ReportAssembler::new(self.config.report_unique).assemble(
            &records,
            &components,
            empty_members,
            stats,
        );

        info!(
            clusters = report.clusters.len(),
            files = files_scanned,
            elapsed_ms = run_start.elapsed().as_millis() as u64,
            "dedupe run complete"
        );
        Ok(report)
    }
}

fn check_cancel(cancel: &AtomicBool, stage: &str) -> Result<()> {
    if cancel.load(Ordering::Relaxed) {
        return Err(SimdupeError::cancelled(stage));
    }
    Ok(())
}
