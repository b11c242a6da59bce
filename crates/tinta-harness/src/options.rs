#![forbid(unsafe_code)]

//! Normalization applied to both sides of a curly-pattern comparison.

use tinta_text::{
    LineSeparator, is_line_separator_char, remove_trailing_line_separator, strip_ansi,
    unify_line_separators,
};

/// Preprocessing toggles for curly-pattern matching.
///
/// Line separators are always unified to LF. Every other step is on by
/// default and runs in field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Drop one trailing line separator.
    pub remove_trailing_line_separator: bool,
    /// Strip escape sequences.
    pub remove_ansi: bool,
    /// Replace every non-separator whitespace character with a space.
    pub unify_whitespaces: bool,
    /// Trim trailing whitespace from each line.
    pub trim_end_lines: bool,
    /// Trim surrounding whitespace from the whole text.
    pub trim: bool,
}

impl MatchOptions {
    /// All preprocessing steps enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            remove_trailing_line_separator: true,
            remove_ansi: true,
            unify_whitespaces: true,
            trim_end_lines: true,
            trim: true,
        }
    }

    /// Only line separator unification, for exact comparisons.
    #[must_use]
    pub const fn exact() -> Self {
        Self {
            remove_trailing_line_separator: false,
            remove_ansi: false,
            unify_whitespaces: false,
            trim_end_lines: false,
            trim: false,
        }
    }

    /// Set whether to drop one trailing line separator.
    #[must_use]
    pub const fn remove_trailing_line_separator(mut self, enabled: bool) -> Self {
        self.remove_trailing_line_separator = enabled;
        self
    }

    /// Set whether to strip escape sequences.
    #[must_use]
    pub const fn remove_ansi(mut self, enabled: bool) -> Self {
        self.remove_ansi = enabled;
        self
    }

    /// Set whether to replace exotic whitespace with plain spaces.
    #[must_use]
    pub const fn unify_whitespaces(mut self, enabled: bool) -> Self {
        self.unify_whitespaces = enabled;
        self
    }

    /// Set whether to trim trailing whitespace from each line.
    #[must_use]
    pub const fn trim_end_lines(mut self, enabled: bool) -> Self {
        self.trim_end_lines = enabled;
        self
    }

    /// Set whether to trim the whole text.
    #[must_use]
    pub const fn trim(mut self, enabled: bool) -> Self {
        self.trim = enabled;
        self
    }

    /// Run the enabled steps over `text`.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let mut text = unify_line_separators(text, LineSeparator::Lf);
        if self.remove_trailing_line_separator {
            let kept = remove_trailing_line_separator(&text).len();
            text.truncate(kept);
        }
        if self.remove_ansi {
            text = strip_ansi(&text).into_owned();
        }
        if self.unify_whitespaces {
            text = text
                .chars()
                .map(|c| {
                    if c.is_whitespace() && !is_line_separator_char(c) {
                        ' '
                    } else {
                        c
                    }
                })
                .collect();
        }
        if self.trim_end_lines {
            text = text
                .split(LineSeparator::Lf.as_str())
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join(LineSeparator::Lf.as_str());
        }
        if self.trim {
            text = text.trim().to_owned();
        }
        text
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self::new()
    }
}
