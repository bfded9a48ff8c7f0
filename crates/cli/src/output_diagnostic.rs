// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic output helpers for setup errors and warnings.
//!
//! Provides ANSI color support with automatic terminal detection.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        }
    }

    /// ANSI foreground color code
    fn color(self) -> u8 {
        match self {
            Severity::Error => 31,
            Severity::Warning => 33,
        }
    }
}

/// Print an error message to stderr.
///
/// Displays in red when stderr is a terminal, plain text otherwise.
pub fn print_error(msg: impl Display) {
    print_diagnostic(Severity::Error, msg);
}

/// Print a warning message to stderr.
///
/// Displays in yellow when stderr is a terminal, plain text otherwise.
pub fn print_warning(msg: impl Display) {
    print_diagnostic(Severity::Warning, msg);
}

fn print_diagnostic(severity: Severity, msg: impl Display) {
    let is_tty = io::stderr().is_terminal();
    write_diagnostic(&mut io::stderr(), severity, msg, is_tty);
}

/// Write a diagnostic to a writer with explicit terminal flag.
fn write_diagnostic<W: Write>(
    writer: &mut W,
    severity: Severity,
    msg: impl Display,
    is_terminal: bool,
) {
    if is_terminal {
        let _ = writeln!(
            writer,
            "\x1b[{}m{}: {}\x1b[0m",
            severity.color(),
            severity.label(),
            msg
        );
    } else {
        let _ = writeln!(writer, "{}: {}", severity.label(), msg);
    }
}

#[cfg(test)]
#[path = "output_diagnostic_tests.rs"]
mod tests;
