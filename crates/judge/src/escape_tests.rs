// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use yare::parameterized;

#[parameterized(
    plain = { "abc", "abc" },
    tab = { "a\tb", "a\\tb" },
    newline = { "line\n", "line\\n" },
    carriage_return = { "a\r\n", "a\\r\\n" },
    backslash = { "C:\\dir", "C:\\\\dir" },
    empty = { "", "" },
    unicode = { "é\n", "é\\n" },
)]
fn escapes_control_characters(raw: &str, expected: &str) {
    assert_eq!(escape(raw), expected);
}

#[test]
fn test_escape_multi_or_joins_candidates() {
    assert_eq!(escape_multi_or(&["A\n", "B\n"]), "A\\n OR B\\n");
}

#[test]
fn test_escape_multi_custom_delim() {
    assert_eq!(escape_multi(&["x", "y\tz"], ", "), "x, y\\tz");
}

#[test]
fn test_escape_multi_empty() {
    let none: [&str; 0] = [];
    assert_eq!(escape_multi_or(&none), "");
}

proptest! {
    #[test]
    fn escaped_output_has_no_raw_controls(raw in "(?s).{0,64}") {
        let escaped = escape(&raw);
        prop_assert!(!escaped.contains('\n'));
        prop_assert!(!escaped.contains('\t'));
        prop_assert!(!escaped.contains('\r'));
    }
}
