// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Result aggregation by category and tag.

use crate::verdict::Verdict;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// One judged test
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TestRecord {
    pub name: String,
    pub tags: BTreeSet<String>,
    pub verdict: Verdict,
}

/// Verdicts of one category, in recording order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRun {
    name: String,
    records: Vec<TestRecord>,
    elapsed_ms: Option<u64>,
}

impl CategoryRun {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            records: Vec::new(),
            elapsed_ms: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    pub fn passed(&self) -> usize {
        self.records.iter().filter(|r| r.verdict.passed()).count()
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Whether all tests have been recorded; a finalized run no longer changes
    pub fn is_finalized(&self) -> bool {
        self.elapsed_ms.is_some()
    }

    /// Wall-clock time of the category once finalized, otherwise the sum of test times
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
            .unwrap_or_else(|| self.records.iter().map(|r| r.verdict.elapsed_ms()).sum())
    }

    pub fn summary(&self) -> CategorySummary {
        CategorySummary {
            passed: self.passed(),
            total: self.total(),
            elapsed_ms: self.elapsed_ms(),
        }
    }
}

/// Pass/total counts of one category
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub passed: usize,
    pub total: usize,
    pub elapsed_ms: u64,
}

/// Counts over a whole run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub per_category: BTreeMap<String, CategorySummary>,
    pub overall_passed: usize,
    pub overall_total: usize,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.overall_passed == self.overall_total
    }
}

/// Snapshot of collected results
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunResults {
    categories: Vec<CategoryRun>,
}

impl RunResults {
    pub fn categories(&self) -> &[CategoryRun] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&CategoryRun> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Whether no test was recorded
    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.records.is_empty())
    }

    pub fn summarize(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for category in &self.categories {
            let entry = category.summary();
            summary.overall_passed += entry.passed;
            summary.overall_total += entry.total;
            summary.per_category.insert(category.name.clone(), entry);
        }
        summary
    }

    /// Keep only tests whose tags are all contained in `tags`.
    ///
    /// Categories emptied by the filter are dropped; categories that were
    /// already empty stay. Kept categories carry their elapsed time
    /// unchanged. `self` is not modified.
    pub fn extract_only(&self, tags: &BTreeSet<String>) -> RunResults {
        let categories = self
            .categories
            .iter()
            .filter_map(|category| {
                let records: Vec<TestRecord> = category
                    .records
                    .iter()
                    .filter(|r| r.tags.is_subset(tags))
                    .cloned()
                    .collect();
                if records.is_empty() && !category.records.is_empty() {
                    return None;
                }
                Some(CategoryRun {
                    name: category.name.clone(),
                    records,
                    elapsed_ms: category.elapsed_ms,
                })
            })
            .collect();
        RunResults { categories }
    }

    /// Fraction of passing tests among those carrying each tag.
    ///
    /// `None` for a tag no test carries.
    pub fn tag_pass_ratios<S: AsRef<str>>(&self, tags: &[S]) -> Vec<Option<f64>> {
        tags.iter()
            .map(|tag| {
                let (passed, total) = self
                    .categories
                    .iter()
                    .flat_map(|c| c.records.iter())
                    .filter(|r| r.tags.contains(tag.as_ref()))
                    .fold((0usize, 0usize), |(passed, total), r| {
                        (passed + usize::from(r.verdict.passed()), total + 1)
                    });
                (total > 0).then(|| passed as f64 / total as f64)
            })
            .collect()
    }
}

/// Errors from recording into the aggregator
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("category '{0}' is finalized")]
    Finalized(String),
}

#[derive(Serialize)]
struct LogLine<'a> {
    seq: u64,
    category: &'a str,
    passed: bool,
    #[serde(flatten)]
    record: &'a TestRecord,
}

#[derive(Default)]
struct State {
    categories: Vec<CategoryRun>,
    recorded: u64,
}

impl State {
    fn category_mut(&mut self, name: &str) -> &mut CategoryRun {
        let index = match self.categories.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.categories.push(CategoryRun::new(name));
                self.categories.len() - 1
            }
        };
        &mut self.categories[index]
    }
}

/// Thread-safe collector of verdicts.
///
/// Clones share the same underlying results.
#[derive(Clone)]
pub struct ResultAggregator {
    start: Instant,
    state: Arc<Mutex<State>>,
    file_writer: Option<Arc<Mutex<BufWriter<File>>>>,
}

impl ResultAggregator {
    /// Create a new in-memory aggregator
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            state: Arc::new(Mutex::new(State::default())),
            file_writer: None,
        }
    }

    /// Create an aggregator that also writes every record to a file (JSONL format)
    pub fn with_file(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            file_writer: Some(Arc::new(Mutex::new(BufWriter::new(file)))),
            ..Self::new()
        })
    }

    /// Start a category; a category with no tests summarizes as 0/0
    pub fn begin_category(&self, category: &str) {
        self.state.lock().category_mut(category);
    }

    /// Record a verdict, starting the category if needed
    pub fn record(
        &self,
        category: &str,
        test_name: &str,
        verdict: Verdict,
        tags: &BTreeSet<String>,
    ) -> Result<(), RecordError> {
        let mut state = self.state.lock();
        let seq = state.recorded;
        let run = state.category_mut(category);
        if run.is_finalized() {
            return Err(RecordError::Finalized(category.to_string()));
        }
        run.records.push(TestRecord {
            name: test_name.to_string(),
            tags: tags.clone(),
            verdict,
        });

        if let (Some(writer), Some(record)) = (&self.file_writer, run.records.last()) {
            let line = LogLine {
                seq,
                category,
                passed: record.verdict.passed(),
                record,
            };
            let mut w = writer.lock();
            if let Ok(json) = serde_json::to_string(&line) {
                let _ = writeln!(w, "{}", json);
                let _ = w.flush();
            }
        }

        state.recorded += 1;
        Ok(())
    }

    /// Close a category with its wall-clock duration; later records are rejected
    pub fn finalize_category(&self, category: &str, elapsed: Duration) {
        let mut state = self.state.lock();
        let run = state.category_mut(category);
        if !run.is_finalized() {
            run.elapsed_ms = Some(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
        }
    }

    /// Snapshot of everything recorded so far
    pub fn results(&self) -> RunResults {
        RunResults {
            categories: self.state.lock().categories.clone(),
        }
    }

    pub fn summarize(&self) -> RunSummary {
        self.results().summarize()
    }

    /// Filtered snapshot; the aggregator itself is untouched
    pub fn extract_only(&self, tags: &BTreeSet<String>) -> RunResults {
        self.results().extract_only(tags)
    }

    /// Time since the aggregator was created
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Total number of recorded tests
    pub fn len(&self) -> usize {
        self.state.lock().categories.iter().map(|c| c.total()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
