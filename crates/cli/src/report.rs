// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Console progress and summaries.

use blackbox_judge::{Diagnostics, RunResults, RunSummary, Verdict};
use std::io::{self, Stderr, Stdout, Write};
use std::time::Duration;

/// Writes progress to `out` and captured stderr of failing tests to `err`.
///
/// Write errors are ignored.
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
    quiet: bool,
}

impl Reporter<Stdout, Stderr> {
    pub fn stdio(quiet: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), quiet)
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    /// `quiet` drops per-test progress; summaries are always written
    pub fn new(out: O, err: E, quiet: bool) -> Self {
        Self { out, err, quiet }
    }

    pub fn category_started(&mut self, category: &str) {
        if !self.quiet {
            let _ = writeln!(self.out, "=> Test suite: \"{}\" tests.", category);
        }
    }

    pub fn test_started(&mut self, test: &str) {
        if !self.quiet {
            let _ = writeln!(self.out, "==> Running test {}", test);
        }
    }

    pub fn test_finished(&mut self, test: &str, verdict: &Verdict) {
        if self.quiet {
            return;
        }
        if verdict.passed() {
            let _ = writeln!(self.out, "===> SUCCESS in {} ms", verdict.elapsed_ms());
            return;
        }
        let _ = writeln!(self.out, "===> FAILED");
        let _ = writeln!(self.out, "====> ERROR: {}.", verdict.describe());
        if let Some(blocks @ Diagnostics::Blocks { .. }) = verdict.diagnostics() {
            let _ = writeln!(self.out, "{}", blocks);
        }
        if let Some(stderr) = verdict.stderr() {
            let _ = writeln!(self.err, "[stderr {}]: {}", test, stderr.trim_end());
        }
    }

    /// One line per category
    pub fn categories(&mut self, summary: &RunSummary, results: &RunResults) {
        for category in results.categories() {
            if let Some(entry) = summary.per_category.get(category.name()) {
                let _ = writeln!(
                    self.out,
                    "Suite \"{}\": {}/{} tests passed in {} ms",
                    category.name(),
                    entry.passed,
                    entry.total,
                    entry.elapsed_ms
                );
            }
        }
    }

    pub fn total(&mut self, summary: &RunSummary, elapsed: Duration) {
        let _ = writeln!(
            self.out,
            "{}/{} tests passed in {} ms.",
            summary.overall_passed,
            summary.overall_total,
            elapsed.as_millis()
        );
    }

    /// Print tags and their pass ratios, tab-separated.
    ///
    /// Returns the ratio line for the clipboard, or `None` when there is
    /// nothing to report.
    pub fn pass_ratios(&mut self, tags: &[String], results: &RunResults) -> Option<String> {
        if tags.is_empty() || results.categories().is_empty() {
            return None;
        }
        let ratios = results
            .tag_pass_ratios(tags)
            .into_iter()
            .map(|ratio| match ratio {
                Some(ratio) => format!("{:?}", ratio),
                None => "n/a".to_string(),
            })
            .collect::<Vec<_>>()
            .join("\t");
        let _ = writeln!(self.out, "{}", tags.join("\t"));
        let _ = writeln!(self.out, "{}", ratios);
        Some(ratios)
    }

    pub fn copied_to_clipboard(&mut self) {
        let _ = writeln!(self.out, "<copied to clipboard>");
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

/// Put `text` on the system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
