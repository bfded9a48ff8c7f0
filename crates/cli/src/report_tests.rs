// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use blackbox_judge::{Failure, FailureKind, ResultAggregator};
use std::collections::BTreeSet;

fn reporter(quiet: bool) -> Reporter<Vec<u8>, Vec<u8>> {
    Reporter::new(Vec::new(), Vec::new(), quiet)
}

fn output(reporter: Reporter<Vec<u8>, Vec<u8>>) -> (String, String) {
    let (out, err) = reporter.into_inner();
    (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

fn failing() -> Verdict {
    Verdict::fail(
        Failure::new(FailureKind::WrongExitCode, "program returns 1, but should return 2"),
        Duration::from_millis(9),
    )
    .with_stderr("bad input\n")
}

fn tags(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_progress_for_passing_test() {
    let mut r = reporter(false);
    r.category_started("sum");
    r.test_started("1");
    r.test_finished("1", &Verdict::pass(Duration::from_millis(12)));
    let (out, err) = output(r);
    assert_eq!(
        out,
        "=> Test suite: \"sum\" tests.\n==> Running test 1\n===> SUCCESS in 12 ms\n"
    );
    assert!(err.is_empty());
}

#[test]
fn test_progress_for_failing_test() {
    let mut r = reporter(false);
    r.test_started("overflow");
    r.test_finished("overflow", &failing());
    let (out, err) = output(r);
    assert_eq!(
        out,
        "==> Running test overflow\n===> FAILED\n====> ERROR: program returns 1, but should return 2.\n"
    );
    assert_eq!(err, "[stderr overflow]: bad input\n");
}

#[test]
fn test_failing_stdout_prints_blocks() {
    let verdict = Verdict::fail(
        Failure::new(
            FailureKind::OutputMismatch,
            "standard output does not match expected",
        )
        .with_diagnostics(Diagnostics::Blocks {
            expected: "4\n".to_string(),
            actual: "5\n".to_string(),
            diff: None,
        }),
        Duration::ZERO,
    );
    let mut r = reporter(false);
    r.test_finished("t", &verdict);
    let (out, _) = output(r);
    assert!(out.contains("Expected:\n\"\"\"\n4\n\"\"\"\nbut actual is:\n\"\"\"\n5\n\"\"\""));
}

#[test]
fn test_quiet_skips_progress() {
    let mut r = reporter(true);
    r.category_started("sum");
    r.test_started("1");
    r.test_finished("1", &failing());
    let (out, err) = output(r);
    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[test]
fn test_summaries() {
    let agg = ResultAggregator::new();
    agg.record("sum", "1", Verdict::pass(Duration::ZERO), &BTreeSet::new())
        .unwrap();
    agg.record("sum", "2", failing(), &BTreeSet::new()).unwrap();
    agg.finalize_category("sum", Duration::from_millis(30));
    agg.begin_category("empty");
    agg.finalize_category("empty", Duration::ZERO);

    let results = agg.results();
    let summary = results.summarize();
    let mut r = reporter(true);
    r.categories(&summary, &results);
    r.total(&summary, Duration::from_millis(42));
    let (out, _) = output(r);
    assert_eq!(
        out,
        "Suite \"sum\": 1/2 tests passed in 30 ms\n\
         Suite \"empty\": 0/0 tests passed in 0 ms\n\
         1/2 tests passed in 42 ms.\n"
    );
}

#[test]
fn test_pass_ratios() {
    let agg = ResultAggregator::new();
    agg.record("c", "a", Verdict::pass(Duration::ZERO), &tags(&["x"]))
        .unwrap();
    agg.record("c", "b", failing(), &tags(&["x", "y"])).unwrap();

    let mut r = reporter(true);
    let line = r.pass_ratios(
        &["x".to_string(), "y".to_string(), "z".to_string()],
        &agg.results(),
    );
    assert_eq!(line.as_deref(), Some("0.5\t0.0\tn/a"));
    let (out, _) = output(r);
    assert_eq!(out, "x\ty\tz\n0.5\t0.0\tn/a\n");
}

#[test]
fn test_pass_ratios_without_tags_or_results() {
    let mut r = reporter(false);
    assert_eq!(r.pass_ratios(&[], &RunResults::default()), None);
    assert_eq!(
        r.pass_ratios(&["x".to_string()], &RunResults::default()),
        None
    );
    let (out, _) = output(r);
    assert!(out.is_empty());
}
