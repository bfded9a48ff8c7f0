// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::verdict::{Failure, FailureKind};
use proptest::prelude::*;
use rstest::rstest;
use std::thread;

fn tags(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn pass() -> Verdict {
    Verdict::pass(Duration::from_millis(4))
}

fn fail() -> Verdict {
    Verdict::fail(
        Failure::new(FailureKind::OutputMismatch, "standard output does not match expected"),
        Duration::from_millis(6),
    )
}

fn sample() -> ResultAggregator {
    let agg = ResultAggregator::new();
    agg.record("math", "add", pass(), &tags(&["basic"])).unwrap();
    agg.record("math", "div", fail(), &tags(&["basic", "edge"]))
        .unwrap();
    agg.record("io", "echo", pass(), &tags(&["io"])).unwrap();
    agg.record("io", "untagged", pass(), &BTreeSet::new()).unwrap();
    agg
}

#[test]
fn test_summarize_counts_per_category() {
    let summary = sample().summarize();
    assert_eq!(summary.overall_passed, 3);
    assert_eq!(summary.overall_total, 4);
    assert!(!summary.all_passed());

    let math = summary.per_category["math"];
    assert_eq!((math.passed, math.total), (1, 2));
    let io = summary.per_category["io"];
    assert_eq!((io.passed, io.total), (2, 2));
}

#[test]
fn test_categories_keep_recording_order() {
    let results = sample().results();
    let names: Vec<&str> = results.categories().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["math", "io"]);
    let tests: Vec<&str> = results.categories()[0]
        .records()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(tests, vec!["add", "div"]);
}

#[test]
fn test_empty_category_summarizes_zero_of_zero() {
    let agg = ResultAggregator::new();
    agg.begin_category("empty");
    agg.finalize_category("empty", Duration::from_millis(1));

    let summary = agg.summarize();
    assert_eq!(summary.per_category["empty"], CategorySummary {
        passed: 0,
        total: 0,
        elapsed_ms: 1,
    });
    assert!(summary.all_passed());
    assert!(agg.is_empty());
}

#[test]
fn test_record_after_finalize_is_rejected() {
    let agg = ResultAggregator::new();
    agg.record("c", "a", pass(), &BTreeSet::new()).unwrap();
    agg.finalize_category("c", Duration::from_millis(20));

    let err = agg.record("c", "b", pass(), &BTreeSet::new()).unwrap_err();
    assert_eq!(err, RecordError::Finalized("c".to_string()));
    assert_eq!(agg.len(), 1);
}

#[test]
fn test_finalize_sets_wall_clock_once() {
    let agg = ResultAggregator::new();
    agg.record("c", "a", pass(), &BTreeSet::new()).unwrap();
    assert!(!agg.results().categories()[0].is_finalized());
    assert_eq!(agg.results().categories()[0].elapsed_ms(), 4);

    agg.finalize_category("c", Duration::from_millis(50));
    agg.finalize_category("c", Duration::from_millis(90));
    let results = agg.results();
    assert!(results.categories()[0].is_finalized());
    assert_eq!(results.categories()[0].elapsed_ms(), 50);
}

#[rstest]
#[case::only_basic(&["basic"], 2, 2)]
#[case::basic_and_edge(&["basic", "edge"], 2, 3)]
#[case::io(&["io"], 2, 2)]
#[case::everything(&["basic", "edge", "io"], 3, 4)]
fn test_extract_only_keeps_tag_subsets(
    #[case] only: &[&str],
    #[case] passed: usize,
    #[case] total: usize,
) {
    let filtered = sample().extract_only(&tags(only));
    let summary = filtered.summarize();
    assert_eq!(summary.overall_passed, passed);
    assert_eq!(summary.overall_total, total);
}

#[test]
fn test_extract_only_with_empty_set_keeps_untagged() {
    let filtered = sample().extract_only(&BTreeSet::new());
    assert_eq!(filtered.categories().len(), 1);
    let io = filtered.category("io").unwrap();
    assert_eq!(io.records().len(), 1);
    assert_eq!(io.records()[0].name, "untagged");
    assert!(filtered.category("math").is_none());
}

#[test]
fn test_extract_only_leaves_aggregator_untouched() {
    let agg = sample();
    let _ = agg.extract_only(&tags(&["io"]));
    assert_eq!(agg.len(), 4);
}

#[test]
fn test_extract_only_unknown_tag_keeps_untagged() {
    let filtered = sample().extract_only(&tags(&["missing"]));
    assert_eq!(filtered.categories().len(), 1);
    let io = filtered.category("io").unwrap();
    assert_eq!(io.records().len(), 1);
    assert_eq!(io.records()[0].name, "untagged");
}

#[test]
fn test_extract_only_full_tag_set_is_identity() {
    let agg = ResultAggregator::new();
    agg.begin_category("empty");
    agg.finalize_category("empty", Duration::from_millis(3));
    agg.record("math", "add", pass(), &tags(&["basic"])).unwrap();
    agg.finalize_category("math", Duration::from_millis(500));

    let results = agg.results();
    let filtered = results.extract_only(&tags(&["basic"]));
    assert_eq!(filtered, results);
    assert_eq!(filtered.summarize().per_category["empty"], CategorySummary {
        passed: 0,
        total: 0,
        elapsed_ms: 3,
    });
    assert_eq!(filtered.summarize().per_category["math"].elapsed_ms, 500);
}

#[test]
fn test_extract_only_keeps_wall_clock_of_filtered_category() {
    let agg = sample();
    agg.finalize_category("math", Duration::from_millis(70));

    let filtered = agg.extract_only(&tags(&["basic"]));
    let math = filtered.category("math").unwrap();
    assert_eq!(math.total(), 1);
    assert_eq!(math.elapsed_ms(), 70);
}

#[test]
fn test_tag_pass_ratios() {
    let ratios = sample().results().tag_pass_ratios(&["basic", "edge", "io", "absent"]);
    assert_eq!(ratios, vec![Some(0.5), Some(0.0), Some(1.0), None]);
}

#[test]
fn test_concurrent_records_are_all_kept() {
    let agg = ResultAggregator::new();
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let agg = agg.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    let verdict = if i % 5 == 0 { fail() } else { pass() };
                    agg.record(
                        &format!("cat{}", worker % 2),
                        &format!("t{}-{}", worker, i),
                        verdict,
                        &BTreeSet::new(),
                    )
                    .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let summary = agg.summarize();
    assert_eq!(summary.overall_total, 200);
    assert_eq!(summary.overall_passed, 160);
    assert_eq!(summary.per_category["cat0"].total, 100);
    assert_eq!(summary.per_category["cat1"].total, 100);
}

#[test]
fn test_with_file_writes_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.jsonl");
    let agg = ResultAggregator::with_file(&path).unwrap();
    agg.record("math", "add", pass(), &tags(&["basic"])).unwrap();
    agg.record("math", "div", fail(), &BTreeSet::new()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["seq"], 0);
    assert_eq!(lines[0]["category"], "math");
    assert_eq!(lines[0]["name"], "add");
    assert_eq!(lines[0]["passed"], true);
    assert_eq!(lines[0]["tags"][0], "basic");
    assert_eq!(lines[1]["seq"], 1);
    assert_eq!(lines[1]["passed"], false);
    assert_eq!(lines[1]["verdict"]["kind"], "output_mismatch");
}

#[test]
fn test_with_file_fails_for_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("results.jsonl");
    assert!(ResultAggregator::with_file(&path).is_err());
}

proptest! {
    #[test]
    fn prop_summary_matches_recorded(outcomes in proptest::collection::vec(any::<bool>(), 0..40)) {
        let agg = ResultAggregator::new();
        for (i, ok) in outcomes.iter().enumerate() {
            let verdict = if *ok { pass() } else { fail() };
            agg.record("c", &i.to_string(), verdict, &BTreeSet::new()).unwrap();
        }
        let summary = agg.summarize();
        prop_assert_eq!(summary.overall_total, outcomes.len());
        prop_assert_eq!(summary.overall_passed, outcomes.iter().filter(|b| **b).count());
        prop_assert!(summary.overall_passed <= summary.overall_total);
    }
}
