// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line interface.

use crate::config::Overrides;
use clap::Parser;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Run a black-box test suite against a program
#[derive(Parser, Clone, Debug)]
#[command(name = "blackbox", version, about = "Black-box test harness")]
pub struct Cli {
    /// Suite file (TOML)
    #[arg(value_name = "SUITE")]
    pub suite: PathBuf,

    /// Run only tests whose tags are all among these (can be specified multiple times)
    #[arg(long = "only", value_name = "TAG")]
    pub only: Vec<String>,

    /// Print pass ratios for these tags and copy them to the clipboard
    #[arg(long = "clip", value_name = "TAG")]
    pub clip: Vec<String>,

    /// Write one JSON line per judged test to this file
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Timeout for every test, overriding the suite file
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Program under test, overriding the suite file
    #[arg(long, value_name = "PATH")]
    pub executable: Option<PathBuf>,

    /// Show a unified diff for every failed stdout comparison
    #[arg(long)]
    pub show_diff: bool,

    /// Only print summaries
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Command-line values layered over the environment
    pub fn overrides(&self) -> Overrides {
        Overrides::layered(self.timeout_ms, self.executable.clone(), self.show_diff)
    }

    /// Tag filter, if `--only` was given
    pub fn only_tags(&self) -> Option<BTreeSet<String>> {
        (!self.only.is_empty()).then(|| self.only.iter().cloned().collect())
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
