// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box test harness binary entry point.

use clap::Parser;

use blackbox::cli::Cli;
use blackbox::executor::SuiteExecutor;
use blackbox::output_diagnostic::{print_error, print_warning};
use blackbox::report::{copy_to_clipboard, Reporter};
use blackbox::suite::Suite;
use blackbox_judge::ResultAggregator;

/// Some selected test failed
const EXIT_FAILURE: i32 = 1;
/// The suite could not be loaded
const EXIT_SETUP: i32 = 2;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let suite = match Suite::load(&cli.suite, &cli.overrides()) {
        Ok(suite) => suite,
        Err(e) => {
            print_error(e);
            std::process::exit(EXIT_SETUP);
        }
    };
    let suite = match cli.only_tags() {
        Some(tags) => suite.extract_only(&tags),
        None => suite,
    };
    if suite.is_empty() {
        print_warning("no tests selected");
    }

    let aggregator = match &cli.log {
        Some(path) => match ResultAggregator::with_file(path) {
            Ok(aggregator) => aggregator,
            Err(e) => {
                print_error(format_args!("failed to open log {}: {}", path.display(), e));
                std::process::exit(EXIT_SETUP);
            }
        },
        None => ResultAggregator::new(),
    };

    let mut reporter = Reporter::stdio(cli.quiet);
    let executor = SuiteExecutor::new(aggregator.clone());
    let results = executor.run(&suite, &mut reporter).await?;

    let summary = results.summarize();
    reporter.categories(&summary, &results);
    reporter.total(&summary, aggregator.elapsed());

    if let Some(ratios) = reporter.pass_ratios(&cli.clip, &results) {
        match copy_to_clipboard(&ratios) {
            Ok(()) => reporter.copied_to_clipboard(),
            Err(e) => print_warning(format_args!("failed to copy to clipboard: {}", e)),
        }
    }

    if !summary.all_passed() {
        std::process::exit(EXIT_FAILURE);
    }
    Ok(())
}
