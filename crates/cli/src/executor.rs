// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential suite execution.

use crate::report::Reporter;
use crate::suite::{Suite, TestCase};
use blackbox_capture::ProcessRunner;
use blackbox_judge::{compare, RecordError, ResultAggregator, RunResults, Verdict};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Runs every test of a suite in order and records the verdicts
#[derive(Clone, Default)]
pub struct SuiteExecutor {
    runner: ProcessRunner,
    aggregator: ResultAggregator,
}

impl SuiteExecutor {
    pub fn new(aggregator: ResultAggregator) -> Self {
        Self {
            runner: ProcessRunner::new(),
            aggregator,
        }
    }

    /// Set the runner used to launch tests
    pub fn with_runner(mut self, runner: ProcessRunner) -> Self {
        self.runner = runner;
        self
    }

    pub fn aggregator(&self) -> &ResultAggregator {
        &self.aggregator
    }

    /// Run all categories, one test at a time
    pub async fn run<O: Write, E: Write>(
        &self,
        suite: &Suite,
        reporter: &mut Reporter<O, E>,
    ) -> Result<RunResults, RecordError> {
        for category in &suite.categories {
            let start = Instant::now();
            self.aggregator.begin_category(&category.name);
            reporter.category_started(&category.name);

            for test in &category.tests {
                reporter.test_started(&test.name);
                let verdict = self.run_test(&suite.executable, test).await;
                reporter.test_finished(&test.name, &verdict);
                self.aggregator
                    .record(&category.name, &test.name, verdict, test.tags())?;
            }

            self.aggregator
                .finalize_category(&category.name, start.elapsed());
        }
        Ok(self.aggregator.results())
    }

    /// Launch one test and judge it
    pub async fn run_test(&self, executable: &Path, test: &TestCase) -> Verdict {
        let start = Instant::now();
        match self.runner.run(&test.invocation(executable)).await {
            Ok(capture) => compare(&test.spec, &capture),
            Err(e) => Verdict::from_run_error(&e, start.elapsed()),
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
