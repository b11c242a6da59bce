//! Curly-pattern corpus.
//!
//! Each case pairs rendered output with a pattern and the expected verdict
//! under the default normalization.

use tinta_harness::{MatchOptions, MatchesCurlyPattern, assert_matches_curly_pattern};
use tinta_style::{Color, Style};
use tinta_text::{AnsiString, wrap_lines};

#[derive(Debug, Clone)]
struct PatternCase {
    text: &'static str,
    pattern: &'static str,
    matches: bool,
    description: &'static str,
}

impl PatternCase {
    const fn new(
        text: &'static str,
        pattern: &'static str,
        matches: bool,
        description: &'static str,
    ) -> Self {
        Self {
            text,
            pattern,
            matches,
            description,
        }
    }
}

// =============================================================================
// Single-line wildcard
// =============================================================================

const SINGLE_LINE_CASES: &[PatternCase] = &[
    PatternCase::new("this is a test", "this is a {}", true, "trailing wildcard"),
    PatternCase::new("this is a test", "this is also a {}", false, "literal differs"),
    PatternCase::new("this is a test", "{} is a test", true, "leading wildcard"),
    PatternCase::new("this is a test", "this {} test", true, "inner wildcard"),
    PatternCase::new("this is a test", "{}", true, "wildcard only"),
    PatternCase::new("line one\nline two", "line {}", false, "cannot cross lines"),
    PatternCase::new("line one\nline two", "line {}\nline {}", true, "one per line"),
    PatternCase::new("a = 1, b = 2", "a = {}, b = {}", true, "two wildcards"),
];

// =============================================================================
// Multi-line wildcard
// =============================================================================

const MULTI_LINE_CASES: &[PatternCase] = &[
    PatternCase::new("head\nbody\nfoot", "head\n{{}}\nfoot", true, "inner lines"),
    PatternCase::new("head\nfoot", "head\n{{}}\nfoot", false, "inner needs a line"),
    PatternCase::new("head\nbody\nfoot", "{{}}\nfoot", true, "leading lines"),
    PatternCase::new("foot", "{{}}\nfoot", true, "leading zero lines"),
    PatternCase::new("head\nbody\nfoot", "head\n{{}}", true, "trailing lines"),
    PatternCase::new("head", "head\n{{}}", true, "trailing zero lines"),
    PatternCase::new("anything\nat\nall", "{{}}", true, "wildcard only"),
    PatternCase::new("a\nb\nc", "a{{}}c", true, "spans separators"),
];

// =============================================================================
// Normalization
// =============================================================================

const NORMALIZATION_CASES: &[PatternCase] = &[
    PatternCase::new("\x1b[1mbold\x1b[22m text", "bold text", true, "escapes removed"),
    PatternCase::new("text\n", "text", true, "trailing separator"),
    PatternCase::new("a\r\nb", "a\nb", true, "separators unified"),
    PatternCase::new("a   \nb  ", "a\nb", true, "line ends trimmed"),
    PatternCase::new("\n\n  a\n\n", "a", true, "whole text trimmed"),
    PatternCase::new("a\u{00A0}b", "a b", true, "whitespace unified"),
    PatternCase::new("a\tb", "a {}", true, "tab becomes a space"),
];

#[test]
fn corpus_verdicts() {
    for case in SINGLE_LINE_CASES
        .iter()
        .chain(MULTI_LINE_CASES)
        .chain(NORMALIZATION_CASES)
    {
        assert_eq!(
            case.text.matches_curly_pattern(case.pattern),
            case.matches,
            "{}: {:?} against {:?}",
            case.description,
            case.text,
            case.pattern
        );
    }
}

#[test]
fn macro_accepts_owned_and_borrowed_text() {
    let rendered = String::from("total: 42 items\n");
    assert_matches_curly_pattern!(rendered, "total: {} items");
    assert_matches_curly_pattern!(&rendered, String::from("total: {}"));
    assert_matches_curly_pattern!(
        "a \n",
        "a {}\n",
        MatchOptions::new()
            .trim_end_lines(false)
            .trim(false)
            .remove_trailing_line_separator(false)
    );
}

#[test]
#[should_panic(expected = "✘ line two")]
fn macro_panics_with_marked_lines() {
    assert_matches_curly_pattern!("line one\nline two", "line one\nline 2");
}

#[test]
fn styled_wrapped_output_matches_structurally() {
    let title = Style::new().fg(Color::CYAN).bold().paint("Report");
    let text = AnsiString::from(format!("{title} generated\n"));
    assert!(text.matches_curly_pattern("Report {}"));

    let wrapped = wrap_lines("12345😀7890\n", 3).unwrap();
    assert!(wrapped.matches_curly_pattern("123\n{{}}\n890"));
    assert!(wrapped.matches_curly_pattern("{{}}\n😀7\n890"));
}
