#![forbid(unsafe_code)]

//! Normalized curly-pattern matching and mismatch reports.

use tinta_text::{AnsiString, LineSeparator};

use crate::curly::CurlyPattern;
use crate::options::MatchOptions;

const MATCH_MARKER: char = '✔';
const MISMATCH_MARKER: char = '✘';

/// Curly-pattern matching for rendered text.
///
/// Both the text and the pattern are normalized with [`MatchOptions`]
/// before the pattern is compiled and matched.
pub trait MatchesCurlyPattern {
    /// Match with the default options.
    fn matches_curly_pattern(&self, pattern: &str) -> bool {
        self.matches_curly_pattern_with(pattern, &MatchOptions::default())
    }

    /// Match with explicit options.
    fn matches_curly_pattern_with(&self, pattern: &str, options: &MatchOptions) -> bool;
}

impl MatchesCurlyPattern for str {
    fn matches_curly_pattern_with(&self, pattern: &str, options: &MatchOptions) -> bool {
        let text = options.apply(self);
        let pattern = options.apply(pattern);
        match CurlyPattern::compile(&pattern).mismatch(&text) {
            None => true,
            Some(segment) => {
                tracing::debug!(segment, pattern = %pattern, "curly pattern did not match");
                false
            }
        }
    }
}

impl MatchesCurlyPattern for String {
    fn matches_curly_pattern_with(&self, pattern: &str, options: &MatchOptions) -> bool {
        self.as_str().matches_curly_pattern_with(pattern, options)
    }
}

impl MatchesCurlyPattern for AnsiString {
    fn matches_curly_pattern_with(&self, pattern: &str, options: &MatchOptions) -> bool {
        self.to_string()
            .as_str()
            .matches_curly_pattern_with(pattern, options)
    }
}

/// Line-by-line comparison of normalized `actual` against `pattern`.
///
/// Each actual line is marked `✔` when the corresponding pattern line
/// matches it on its own, or `✘` followed by the expected line. Lines
/// missing on either side are reported as mismatches. The report is a
/// diagnostic: a `{{}}` spanning several lines throws the alignment off.
#[must_use]
pub fn mismatch_report(actual: &str, pattern: &str, options: &MatchOptions) -> String {
    let actual = options.apply(actual);
    let pattern = options.apply(pattern);
    let separator = LineSeparator::Lf.as_str();
    let actual_lines: Vec<&str> = actual.split(separator).collect();
    let pattern_lines: Vec<&str> = pattern.split(separator).collect();

    let mut out = String::from("text does not match the curly pattern\n");
    for i in 0..actual_lines.len().max(pattern_lines.len()) {
        match (actual_lines.get(i), pattern_lines.get(i)) {
            (Some(a), Some(p)) if CurlyPattern::compile(p).matches(a) => {
                out.push_str(&format!("{MATCH_MARKER} {a}\n"));
            }
            (Some(a), Some(p)) => {
                out.push_str(&format!("{MISMATCH_MARKER} {a}\n    expected: {p}\n"));
            }
            (Some(a), None) => {
                out.push_str(&format!("{MISMATCH_MARKER} {a}\n    expected: <no line>\n"));
            }
            (None, Some(p)) => {
                out.push_str(&format!("{MISMATCH_MARKER} <no line>\n    expected: {p}\n"));
            }
            (None, None) => {}
        }
    }
    out
}

/// Panic with a [`mismatch_report`] unless `actual` matches `pattern`.
#[track_caller]
pub fn assert_matches_curly_pattern(actual: &str, pattern: &str, options: &MatchOptions) {
    if !actual.matches_curly_pattern_with(pattern, options) {
        panic!("{}", mismatch_report(actual, pattern, options));
    }
}
