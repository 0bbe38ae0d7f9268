//! Report Formatting and Display Functions
//!
//! Renders a dedupe report for the console. JSON output is handled at the
//! command layer; this module owns the human-readable rendering only.

use console::style;

use simdupe::io::reports::{ClusterMember, DedupeReport};

/// Render a report as human-readable text on stdout.
pub fn render_text(report: &DedupeReport) {
    if report.clusters.is_empty() {
        println!("{}", style("No duplicate clusters found.").green());
    }

    for (number, cluster) in report.clusters.iter().enumerate() {
        println!(
            "{} {} files, max distance {} bits, mean {:.1}",
            style(format!("Cluster {}:", number + 1)).cyan().bold(),
            cluster.members.len(),
            cluster.max_intra_distance,
            cluster.mean_intra_distance,
        );
        for member in &cluster.members {
            println!("  {}  {}", style(digest_prefix(member)).dim(), member.path);
        }
        println!();
    }

    if let Some(unique) = &report.unique_files {
        println!("{}", style("Unique files:").cyan().bold());
        for member in unique {
            println!("  {}  {}", style(digest_prefix(member)).dim(), member.path);
        }
        println!();
    }

    if !report.empty_files.is_empty() {
        println!("{}", style("Empty files:").cyan().bold());
        for member in &report.empty_files {
            println!("  {}", member.path);
        }
        println!();
    }

    let stats = &report.stats;
    println!(
        "{} {} scanned, {} fingerprinted, {} unique contents, \
         {} candidate pairs, {} accepted, {} unreadable",
        style("Summary:").bold(),
        stats.files_scanned,
        stats.files_fingerprinted,
        stats.unique_contents,
        stats.candidate_pairs,
        stats.accepted_pairs,
        stats.skipped_unreadable,
    );
}

fn digest_prefix(member: &ClusterMember) -> &str {
    &member.strong_digest[..12]
}
