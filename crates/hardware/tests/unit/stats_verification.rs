//! CacheStats unit tests.
//!
//! Verifies default initialization, outcome recording, derived metrics, and
//! every reporting format of the simulation statistics structure.

use std::fs;

use csim_core::{AccessOutcome, CacheStats};
use pretty_assertions::assert_eq;

#[test]
fn default_stats_all_zero() {
    let stats = CacheStats::default();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.evictions, 0);
    assert_eq!(stats.accesses(), 0);
    assert_eq!(stats, CacheStats::new(0, 0, 0));
}

#[test]
fn record_updates_exactly_one_counter_per_access() {
    let mut stats = CacheStats::default();
    stats.record(AccessOutcome::Hit);
    assert_eq!(stats, CacheStats::new(1, 0, 0));
    stats.record(AccessOutcome::Miss);
    assert_eq!(stats, CacheStats::new(1, 1, 0));
    stats.record(AccessOutcome::MissWithEviction);
    assert_eq!(stats, CacheStats::new(1, 2, 1));
    assert_eq!(stats.accesses(), 3);
}

#[test]
fn rates_with_no_accesses_are_zero() {
    let stats = CacheStats::default();
    assert_eq!(stats.hit_rate(), 0.0);
    assert_eq!(stats.miss_rate(), 0.0);
}

#[test]
fn rates_sum_to_one() {
    let stats = CacheStats::new(3, 1, 1);
    assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
    assert!((stats.miss_rate() - 0.25).abs() < f64::EPSILON);
    assert!((stats.hit_rate() + stats.miss_rate() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn display_is_summary_line() {
    assert_eq!(
        CacheStats::new(4, 5, 3).to_string(),
        "hits:4 misses:5 evictions:3"
    );
    assert_eq!(
        CacheStats::default().to_string(),
        "hits:0 misses:0 evictions:0"
    );
}

#[test]
fn json_contains_counters_and_rates() {
    let json = CacheStats::new(1, 3, 2).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["hits"], 1);
    assert_eq!(value["misses"], 3);
    assert_eq!(value["evictions"], 2);
    assert_eq!(value["accesses"], 4);
    assert_eq!(value["hit_rate"], 0.25);
    assert_eq!(value["miss_rate"], 0.75);
}

#[test]
fn serializes_as_plain_counters() {
    let value = serde_json::to_value(CacheStats::new(7, 8, 9)).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "hits": 7, "misses": 8, "evictions": 9 })
    );
}

#[test]
fn results_file_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".csim_results");

    CacheStats::new(4, 5, 3).write_results(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "4 5 3\n");

    CacheStats::new(2, 7, 5).write_results(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "2 7 5\n", "file is overwritten");
}

#[test]
fn results_file_in_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("results");
    assert!(CacheStats::default().write_results(path).is_err());
}
