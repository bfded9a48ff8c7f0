// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Printable escaping of captured text.

/// Replace tab, newline, carriage return and backslash with their escapes.
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\\' => escaped.push_str("\\\\"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape each string and join them with `delim`.
pub fn escape_multi<S: AsRef<str>>(raw: &[S], delim: &str) -> String {
    raw.iter()
        .map(|s| escape(s.as_ref()))
        .collect::<Vec<_>>()
        .join(delim)
}

/// Escape each string and join them as `a OR b OR c`.
pub fn escape_multi_or<S: AsRef<str>>(raw: &[S]) -> String {
    escape_multi(raw, " OR ")
}

#[cfg(test)]
#[path = "escape_tests.rs"]
mod tests;
