//! End-to-end walk-then-dedupe tests against a real temporary directory.

use std::fs;

use tempfile::tempdir;

use simdupe::core::config::{DedupeConfig, SimilarityThreshold};
use simdupe::core::pipeline::DedupePipeline;
use simdupe::io::walker::FileWalker;

fn repeated_text(tag: &str) -> String {
    let mut out = String::new();
    for i in 0..200 {
        out.push_str(&format!(
            "{tag} release notes line {i}: nothing of consequence happened today.\n"
        ));
    }
    out
}

fn config(threshold_bits: u32) -> DedupeConfig {
    DedupeConfig {
        threshold: SimilarityThreshold::Bits(threshold_bits),
        min_size: 0,
        ..DedupeConfig::default()
    }
}

#[test]
fn walk_and_dedupe_find_exact_duplicates_across_subdirectories() {
    let dir = tempdir().unwrap();
    let text = repeated_text("alpha");
    fs::write(dir.path().join("a.txt"), &text).unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested/a-copy.txt"), &text).unwrap();
    fs::write(dir.path().join("other.txt"), repeated_text("omega")).unwrap();

    let cfg = config(0);
    let outcome = FileWalker::new(cfg.min_size).walk(dir.path()).unwrap();
    assert_eq!(outcome.files.len(), 3);

    let report = DedupePipeline::new(cfg).unwrap().run(outcome.files).unwrap();

    assert_eq!(report.clusters.len(), 1);
    assert_eq!(report.clusters[0].members.len(), 2);
    assert_eq!(report.clusters[0].max_intra_distance, 0);

    let digests: Vec<&str> = report.clusters[0]
        .members
        .iter()
        .map(|m| m.strong_digest.as_str())
        .collect();
    assert_eq!(digests[0], digests[1]);
}

#[test]
fn near_duplicates_cluster_and_empty_files_are_isolated() {
    let dir = tempdir().unwrap();
    let text = repeated_text("beta");
    let mut edited = text.clone();
    edited.insert(text.len() / 2, '!');

    fs::write(dir.path().join("orig.txt"), &text).unwrap();
    fs::write(dir.path().join("edited.txt"), &edited).unwrap();
    fs::write(dir.path().join("empty.txt"), "").unwrap();

    let cfg = config(10);
    let outcome = FileWalker::new(cfg.min_size).walk(dir.path()).unwrap();
    let report = DedupePipeline::new(cfg).unwrap().run(outcome.files).unwrap();

    assert_eq!(report.clusters.len(), 1);
    let paths: Vec<&str> = report.clusters[0]
        .members
        .iter()
        .map(|m| m.path.as_str())
        .collect();
    assert!(paths[0].ends_with("edited.txt"));
    assert!(paths[1].ends_with("orig.txt"));

    assert_eq!(report.empty_files.len(), 1);
    assert!(report.empty_files[0].path.ends_with("empty.txt"));
}

#[test]
fn report_serializes_with_stats() {
    let dir = tempdir().unwrap();
    let text = repeated_text("gamma");
    fs::write(dir.path().join("one.txt"), &text).unwrap();
    fs::write(dir.path().join("two.txt"), &text).unwrap();

    let cfg = config(8);
    let outcome = FileWalker::new(cfg.min_size).walk(dir.path()).unwrap();
    let report = DedupePipeline::new(cfg).unwrap().run(outcome.files).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["stats"]["files_scanned"], 2);
    assert_eq!(json["stats"]["unique_contents"], 1);
    assert_eq!(json["clusters"][0]["members"].as_array().unwrap().len(), 2);
}
