#![forbid(unsafe_code)]

//! Structural assertions on rendered terminal text.
//!
//! Curly patterns describe expected output with wildcards instead of exact
//! text: `{}` stands for anything on one line, `{{}}` for anything at all.
//! Before matching, both sides are normalized (escape sequences removed,
//! whitespace unified, lines trimmed) according to [`MatchOptions`].
//!
//! # Example
//!
//! ```
//! use tinta_harness::{MatchesCurlyPattern, assert_matches_curly_pattern};
//!
//! let output = "\x1b[32m✔\x1b[39m build finished in 3.2s\n";
//! assert!(output.matches_curly_pattern("✔ build finished in {}"));
//! assert_matches_curly_pattern!(output, "{} build {}");
//! ```

pub mod curly;
pub mod matching;
pub mod options;

pub use curly::{CurlyPattern, MULTI_LINE_WILDCARD, SINGLE_LINE_WILDCARD, Segment};
pub use matching::{MatchesCurlyPattern, assert_matches_curly_pattern, mismatch_report};
pub use options::MatchOptions;

/// Assert that text matches a curly pattern, panicking with a per-line
/// report otherwise.
///
/// Uses [`MatchOptions::default`] unless options are given.
#[macro_export]
macro_rules! assert_matches_curly_pattern {
    ($actual:expr, $pattern:expr) => {
        $crate::assert_matches_curly_pattern(
            ::core::convert::AsRef::<str>::as_ref(&$actual),
            ::core::convert::AsRef::<str>::as_ref(&$pattern),
            &$crate::MatchOptions::default(),
        )
    };
    ($actual:expr, $pattern:expr, $options:expr) => {
        $crate::assert_matches_curly_pattern(
            ::core::convert::AsRef::<str>::as_ref(&$actual),
            ::core::convert::AsRef::<str>::as_ref(&$pattern),
            &$options,
        )
    };
}
