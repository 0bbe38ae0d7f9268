//! Report assembly: ordered, serializable cluster records.
//!
//! The assembler converts the final components plus per-file metadata into
//! the structure external formatters consume. Ordering is deterministic
//! across runs regardless of traversal order: clusters by descending member
//! count, tie-broken by the lexicographically smallest member path, and
//! member lists sorted by path.

use serde::Serialize;

use crate::core::files::FileRecord;

/// One member of a duplicate cluster.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterMember {
    /// File path
    pub path: String,

    /// File size in bytes
    pub size: u64,

    /// Strong content digest as lowercase hex
    pub strong_digest: String,
}

impl ClusterMember {
    fn from_record(record: &FileRecord) -> Self {
        Self {
            path: record.path.display().to_string(),
            size: record.size,
            strong_digest: record.digest_hex(),
        }
    }
}

/// A group of near-duplicate files.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterRecord {
    /// Cluster members, sorted by path
    pub members: Vec<ClusterMember>,

    /// Maximum pairwise Hamming distance within the cluster, in bits
    pub max_intra_distance: u32,

    /// Mean pairwise Hamming distance within the cluster, in bits
    pub mean_intra_distance: f64,
}

/// Run-level counters surfaced alongside the clusters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportStats {
    /// Files delivered to the engine
    pub files_scanned: usize,

    /// Files that were fingerprinted (non-empty content)
    pub files_fingerprinted: usize,

    /// Distinct strong digests among fingerprinted files
    pub unique_contents: usize,

    /// Candidate pairs proposed by the band index
    pub candidate_pairs: usize,

    /// Candidate pairs accepted by exact scoring
    pub accepted_pairs: usize,

    /// Files the walker could not read
    pub skipped_unreadable: usize,
}

/// Final output of a dedupe run.
#[derive(Debug, Clone, Serialize)]
pub struct DedupeReport {
    /// Duplicate clusters, largest first
    pub clusters: Vec<ClusterRecord>,

    /// Files that belong to no cluster, sorted by path. Only present when
    /// unique-file reporting is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_files: Option<Vec<ClusterMember>>,

    /// Zero-length files, each a degenerate singleton bucket
    pub empty_files: Vec<ClusterMember>,

    /// Run-level counters
    pub stats: ReportStats,
}

/// Converts clusters plus per-file metadata into the final ordered report.
#[derive(Debug, Clone, Copy)]
pub struct ReportAssembler {
    report_unique: bool,
}

impl ReportAssembler {
    /// Create an assembler; `report_unique` controls whether singleton
    /// files are listed.
    pub fn new(report_unique: bool) -> Self {
        Self { report_unique }
    }

    /// Assemble the report from connected components over `records`.
    /// Components of size one are not clusters; they are surfaced only in
    /// the optional unique-file list.
    pub fn assemble(
        &self,
        records: &[FileRecord],
        components: &[Vec<usize>],
        mut empty_files: Vec<ClusterMember>,
        stats: ReportStats,
    ) -> DedupeReport {
        let mut clusters = Vec::new();
        let mut unique = Vec::new();

        for component in components {
            if component.len() < 2 {
                if self.report_unique {
                    unique.push(ClusterMember::from_record(&records[component[0]]));
                }
                continue;
            }
            clusters.push(build_cluster(records, component));
        }

        clusters.sort_by(|a, b| {
            b.members
                .len()
                .cmp(&a.members.len())
                .then_with(|| a.members[0].path.cmp(&b.members[0].path))
        });

        unique.sort_by(|a, b| a.path.cmp(&b.path));
        empty_files.sort_by(|a, b| a.path.cmp(&b.path));

        DedupeReport {
            clusters,
            unique_files: self.report_unique.then_some(unique),
            empty_files,
            stats,
        }
    }
}

fn build_cluster(records: &[FileRecord], component: &[usize]) -> ClusterRecord {
    let mut members: Vec<ClusterMember> = component
        .iter()
        .map(|&index| ClusterMember::from_record(&records[index]))
        .collect();
    members.sort_by(|a, b| a.path.cmp(&b.path));

    // Intra-cluster distance diagnostics over all member pairs.
    let mut max_distance = 0u32;
    let mut total = 0u64;
    let mut pair_count = 0u64;
    for (i, &a) in component.iter().enumerate() {
        for &b in &component[i + 1..] {
            let distance = records[a]
                .fingerprint
                .hamming_distance(&records[b].fingerprint);
            max_distance = max_distance.max(distance);
            total += u64::from(distance);
            pair_count += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = if pair_count == 0 {
        0.0
    } else {
        total as f64 / pair_count as f64
    };

    ClusterRecord {
        members,
        max_intra_distance: max_distance,
        mean_intra_distance: mean,
    }
}
