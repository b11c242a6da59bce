#![forbid(unsafe_code)]

//! Line separators and line-oriented operations.
//!
//! Six separators are recognized: LF, CR, CRLF, NEL (U+0085), LS (U+2028)
//! and PS (U+2029). Splitting treats them all alike; only
//! [`detect_line_separator`] ranks them.
//!
//! Results that are reassembled from lines (`map_lines`, `wrap_lines`,
//! `add_column`, ...) are joined with [`LineSeparator::DEFAULT`].

use std::convert::Infallible;
use std::fmt;
use std::ops::Range;

use crate::error::{Result, TextError};
use crate::token::strip_ansi;
use crate::width::{byte_offset, chunk_spans, columns, padding_for};

/// A recognized line separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineSeparator {
    /// `\r\n`
    CrLf,
    /// `\n`
    Lf,
    /// `\r`
    Cr,
    /// U+0085 NEXT LINE
    Nel,
    /// U+2029 PARAGRAPH SEPARATOR
    Ps,
    /// U+2028 LINE SEPARATOR
    Ls,
}

impl LineSeparator {
    /// All separators, highest detection precedence first.
    pub const ALL: [Self; 6] = [Self::CrLf, Self::Lf, Self::Cr, Self::Nel, Self::Ps, Self::Ls];

    /// Separator used to join lines.
    pub const DEFAULT: Self = Self::Lf;

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Lf => "\n",
            Self::Cr => "\r",
            Self::Nel => "\u{0085}",
            Self::Ps => "\u{2029}",
            Self::Ls => "\u{2028}",
        }
    }

    /// Short conventional name such as `"CRLF"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CrLf => "CRLF",
            Self::Lf => "LF",
            Self::Cr => "CR",
            Self::Nel => "NEL",
            Self::Ps => "PS",
            Self::Ls => "LS",
        }
    }

    /// Position in [`LineSeparator::ALL`].
    const fn precedence(self) -> usize {
        self as usize
    }
}

impl Default for LineSeparator {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for LineSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether `c` is, or starts, a line separator.
#[inline]
#[must_use]
pub fn is_line_separator_char(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

/// Find the first separator in `text`: its byte range and kind.
fn find_separator(text: &str) -> Option<(Range<usize>, LineSeparator)> {
    let (at, c) = text.char_indices().find(|&(_, c)| is_line_separator_char(c))?;
    let separator = match c {
        '\r' if text[at + 1..].starts_with('\n') => LineSeparator::CrLf,
        '\r' => LineSeparator::Cr,
        '\n' => LineSeparator::Lf,
        '\u{0085}' => LineSeparator::Nel,
        '\u{2028}' => LineSeparator::Ls,
        _ => LineSeparator::Ps,
    };
    Some((at..at + separator.as_str().len(), separator))
}

/// A line located in its source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineSpan {
    /// Byte range of the line content.
    pub bytes: Range<usize>,
    /// Separator ending the line; `None` for the last line.
    pub separator: Option<LineSeparator>,
}

pub(crate) fn line_spans(text: &str) -> Vec<LineSpan> {
    let mut spans = Vec::new();
    let mut offset = 0;
    while let Some((sep, kind)) = find_separator(&text[offset..]) {
        spans.push(LineSpan {
            bytes: offset..offset + sep.start,
            separator: Some(kind),
        });
        offset += sep.end;
    }
    spans.push(LineSpan {
        bytes: offset..text.len(),
        separator: None,
    });
    spans
}

/// Lazy sequence of the lines of a string, see [`line_sequence`].
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let text = self.rest?;
        match find_separator(text) {
            Some((sep, _)) => {
                self.rest = Some(&text[sep.end..]);
                Some(&text[..sep.start])
            }
            None => {
                self.rest = None;
                Some(text)
            }
        }
    }
}

/// Lines of `text` without their separators.
///
/// Any recognized separator ends a line. Text ending in a separator yields
/// a trailing empty line, and empty text yields one empty line.
#[must_use]
pub fn line_sequence(text: &str) -> Lines<'_> {
    Lines { rest: Some(text) }
}

/// Collected form of [`line_sequence`].
#[must_use]
pub fn lines(text: &str) -> Vec<&str> {
    line_sequence(text).collect()
}

/// Whether `text` ends with any recognized separator.
#[must_use]
pub fn ends_with_line_separator(text: &str) -> bool {
    text.chars().next_back().is_some_and(is_line_separator_char)
}

/// Remove one trailing separator (CRLF counts as one).
#[must_use]
pub fn remove_trailing_line_separator(text: &str) -> &str {
    if let Some(stripped) = text.strip_suffix("\r\n") {
        return stripped;
    }
    match text.chars().next_back() {
        Some(c) if is_line_separator_char(c) => &text[..text.len() - c.len_utf8()],
        _ => text,
    }
}

/// Replace every separator in `text` by `separator`.
#[must_use]
pub fn unify_line_separators(text: &str, separator: LineSeparator) -> String {
    let mut out = String::with_capacity(text.len());
    for span in line_spans(text) {
        out.push_str(&text[span.bytes]);
        if span.separator.is_some() {
            out.push_str(separator.as_str());
        }
    }
    out
}

/// The most frequent separator in `text`.
///
/// CRLF is counted as one separator, never as CR plus LF. Ties go to the
/// earlier entry of [`LineSeparator::ALL`]. Returns `None` for text without
/// separators.
#[must_use]
pub fn detect_line_separator(text: &str) -> Option<LineSeparator> {
    let mut counts = [0usize; LineSeparator::ALL.len()];
    for span in line_spans(text) {
        if let Some(separator) = span.separator {
            counts[separator.precedence()] += 1;
        }
    }
    LineSeparator::ALL
        .into_iter()
        .filter(|s| counts[s.precedence()] > 0)
        .fold(None, |best: Option<LineSeparator>, s| match best {
            Some(b) if counts[b.precedence()] >= counts[s.precedence()] => Some(b),
            _ => Some(s),
        })
}

pub(crate) fn try_map_lines<F, E>(text: &str, mut transform: F) -> std::result::Result<String, E>
where
    F: FnMut(&str) -> std::result::Result<String, E>,
{
    let mut spans = line_spans(text);
    let trailing = spans.len() > 1 && spans.last().is_some_and(|s| s.bytes.is_empty());
    if trailing {
        spans.pop();
    }
    let mut out = String::with_capacity(text.len());
    for (i, span) in spans.into_iter().enumerate() {
        if i > 0 {
            out.push_str(LineSeparator::DEFAULT.as_str());
        }
        out.push_str(&transform(&text[span.bytes])?);
    }
    if trailing {
        out.push_str(LineSeparator::DEFAULT.as_str());
    }
    Ok(out)
}

/// Replace each line of `text` by `transform(line)`.
///
/// Results are joined with [`LineSeparator::DEFAULT`]; a trailing separator
/// is kept as one default separator and does not produce a call for the
/// empty line after it. Empty text invokes `transform` once.
pub fn map_lines<F, S>(text: &str, mut transform: F) -> String
where
    F: FnMut(&str) -> S,
    S: Into<String>,
{
    let mapped = try_map_lines::<_, Infallible>(text, |line| Ok(transform(line).into()));
    match mapped {
        Ok(out) => out,
        Err(never) => match never {},
    }
}

/// Replace each line of `text` by any number of lines.
///
/// Joins like [`map_lines`]; a line mapped to nothing disappears.
pub fn flat_map_lines<F, I, S>(text: &str, mut transform: F) -> String
where
    F: FnMut(&str) -> I,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut produced: Vec<String> = Vec::new();
    let trailing = lines(text).len() > 1 && ends_with_line_separator(text);
    let body = if trailing {
        remove_trailing_line_separator(text)
    } else {
        text
    };
    for line in line_sequence(body) {
        produced.extend(transform(line).into_iter().map(|s| s.as_ref().to_owned()));
    }
    let mut out = produced.join(LineSeparator::DEFAULT.as_str());
    if trailing {
        out.push_str(LineSeparator::DEFAULT.as_str());
    }
    out
}

/// Hard-wrap every line of `text` at `width` columns.
///
/// Grapheme clusters move to the next line whole. A fragment cut short
/// because the next cluster would not fit is padded with spaces to `width`.
/// Wrapping an already wrapped text at the same width changes nothing.
///
/// # Errors
/// Returns [`TextError::InvalidArgument`] if `width` is zero.
pub fn wrap_lines(text: &str, width: usize) -> Result<String> {
    if width == 0 {
        return Err(TextError::invalid_argument(
            "width",
            "wrap width must be at least one column",
        ));
    }
    try_map_lines(text, |line| {
        let mut wrapped = String::with_capacity(line.len());
        let mut rest = line;
        for (i, chunk) in chunk_spans(line, width)?.into_iter().enumerate() {
            if i > 0 {
                wrapped.push_str(LineSeparator::DEFAULT.as_str());
            }
            let len = byte_offset(rest, chunk.chars.end - chunk.chars.start);
            let (piece, tail) = rest.split_at(len);
            wrapped.push_str(piece);
            if chunk.overflowed {
                wrapped.push_str(&" ".repeat(width - chunk.columns));
            }
            rest = tail;
        }
        Ok(wrapped)
    })
}

/// Layout of the gap inserted by [`add_column`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOptions {
    /// Unit repeated to fill lines and the gap.
    pub padding: String,
    /// Columns between the widest left line and the right column.
    pub padding_columns: usize,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self {
            padding: " ".to_owned(),
            padding_columns: 1,
        }
    }
}

impl ColumnOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn padding(mut self, padding: impl Into<String>) -> Self {
        self.padding = padding.into();
        self
    }

    #[must_use]
    pub fn padding_columns(mut self, columns: usize) -> Self {
        self.padding_columns = columns;
        self
    }
}

/// Place `right` next to `left`, line by line.
///
/// The shorter block is extended with empty lines. Each left line is padded
/// to the width of the widest left line plus the gap. Escape sequences do not
/// count towards widths.
///
/// # Errors
/// Returns [`TextError::InvalidArgument`] if the padding occupies no columns.
pub fn add_column(left: &str, right: &str, options: &ColumnOptions) -> Result<String> {
    let left_lines = lines(left);
    let right_lines = lines(right);
    let widths: Vec<usize> = left_lines
        .iter()
        .map(|line| columns(&strip_ansi(line)))
        .collect();
    let target = widths.iter().copied().max().unwrap_or(0) + options.padding_columns;

    let rows = left_lines.len().max(right_lines.len());
    let mut out = String::new();
    for row in 0..rows {
        if row > 0 {
            out.push_str(LineSeparator::DEFAULT.as_str());
        }
        let current = widths.get(row).copied().unwrap_or(0);
        out.push_str(left_lines.get(row).copied().unwrap_or(""));
        out.push_str(&padding_for(current, target, &options.padding)?);
        out.push_str(right_lines.get(row).copied().unwrap_or(""));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_every_separator() {
        assert_eq!(
            lines("a\nb\rc\r\nd\u{0085}e\u{2028}f\u{2029}g"),
            vec!["a", "b", "c", "d", "e", "f", "g"]
        );
    }

    #[test]
    fn trailing_separator_yields_empty_line() {
        assert_eq!(lines("a\n"), vec!["a", ""]);
        assert_eq!(lines("a\r\n"), vec!["a", ""]);
        assert_eq!(lines("\n"), vec!["", ""]);
        assert_eq!(lines(""), vec![""]);
        assert_eq!(lines("a\n\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn line_sequence_is_lazy() {
        let mut seq = line_sequence("one\ntwo\nthree");
        assert_eq!(seq.next(), Some("one"));
        assert_eq!(seq.clone().count(), 2);
        assert_eq!(seq.next(), Some("two"));
    }

    #[test]
    fn trailing_separator_removal() {
        assert_eq!(remove_trailing_line_separator("a\r\n"), "a");
        assert_eq!(remove_trailing_line_separator("a\n\n"), "a\n");
        assert_eq!(remove_trailing_line_separator("a\u{2029}"), "a");
        assert_eq!(remove_trailing_line_separator("a"), "a");
        assert_eq!(remove_trailing_line_separator(""), "");
    }

    #[test]
    fn unification() {
        assert_eq!(
            unify_line_separators("a\r\nb\rc\u{0085}d", LineSeparator::Lf),
            "a\nb\nc\nd"
        );
        assert_eq!(unify_line_separators("a\nb\n", LineSeparator::CrLf), "a\r\nb\r\n");
    }

    #[test]
    fn detection_majority_wins() {
        assert_eq!(detect_line_separator("a\nb\nc\rd"), Some(LineSeparator::Lf));
        assert_eq!(detect_line_separator("a\r\nb\r\nc\n"), Some(LineSeparator::CrLf));
        assert_eq!(detect_line_separator("plain"), None);
    }

    #[test]
    fn detection_ties_follow_precedence() {
        assert_eq!(detect_line_separator("a\rb\u{0085}c"), Some(LineSeparator::Cr));
        assert_eq!(detect_line_separator("a\u{2028}b\u{2029}c"), Some(LineSeparator::Ps));
        assert_eq!(detect_line_separator("a\nb\r\nc"), Some(LineSeparator::CrLf));
    }

    #[test]
    fn map_lines_joins_with_default() {
        assert_eq!(map_lines("a\r\nb", str::to_uppercase), "A\nB");
        assert_eq!(map_lines("a\nb\n", |l| format!("<{l}>")), "<a>\n<b>\n");
    }

    #[test]
    fn map_lines_invokes_for_empty_lines() {
        let mut calls = 0;
        let out = map_lines("", |l| {
            calls += 1;
            format!("[{l}]")
        });
        assert_eq!((out.as_str(), calls), ("[]", 1));
        assert_eq!(map_lines("a\n\nb", |l| format!("[{l}]")), "[a]\n[]\n[b]");
        assert_eq!(map_lines("\n", |l| format!("[{l}]")), "[]\n");
    }

    #[test]
    fn flat_map_lines_expands_and_drops() {
        let out = flat_map_lines("ab\ncd\n", |l| l.chars().map(String::from).collect::<Vec<_>>());
        assert_eq!(out, "a\nb\nc\nd\n");
        let out = flat_map_lines("keep\ndrop\nkeep", |l| (l == "keep").then(|| l.to_owned()));
        assert_eq!(out, "keep\nkeep");
    }

    #[test]
    fn wrap_pads_overflow_breaks() {
        assert_eq!(
            wrap_lines("12345😀7890\n", 3).unwrap(),
            "123\n45 \n😀7\n890\n"
        );
        assert_eq!(wrap_lines("abcdefgh", 3).unwrap(), "abc\ndef\ngh");
        assert_eq!(wrap_lines("", 3).unwrap(), "");
        assert_eq!(wrap_lines("ab\n\ncd", 5).unwrap(), "ab\n\ncd");
    }

    #[test]
    fn wrap_is_idempotent() {
        for text in ["12345😀7890\n", "a\u{0333}bcdefg", "中文中文中文", "x"] {
            let once = wrap_lines(text, 3).unwrap();
            assert_eq!(wrap_lines(&once, 3).unwrap(), once, "{text:?}");
        }
    }

    #[test]
    fn wrap_rejects_zero_width() {
        assert!(matches!(
            wrap_lines("abc", 0),
            Err(TextError::InvalidArgument { name: "width", .. })
        ));
    }

    #[test]
    fn add_column_pads_left_block() {
        let out = add_column("a\nbbb", "1\n2\n3", &ColumnOptions::default()).unwrap();
        assert_eq!(out, "a   1\nbbb 2\n    3");
    }

    #[test]
    fn add_column_with_custom_gap() {
        let options = ColumnOptions::new().padding("·").padding_columns(2);
        let out = add_column("ab\nc", "x", &options).unwrap();
        assert_eq!(out, "ab··x\nc···");
    }

    #[test]
    fn add_column_ignores_escapes_when_measuring() {
        let out = add_column("\x1b[31mab\x1b[39m\nc", "x\ny", &ColumnOptions::default()).unwrap();
        assert_eq!(out, "\x1b[31mab\x1b[39m x\nc  y");
    }

    #[test]
    fn add_column_rejects_zero_width_padding() {
        let options = ColumnOptions::new().padding("");
        assert!(add_column("a", "b", &options).is_err());
    }
}
