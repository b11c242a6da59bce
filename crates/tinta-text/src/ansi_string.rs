#![forbid(unsafe_code)]

//! Styled strings that stay correct when cut.
//!
//! An [`AnsiString`] is an immutable token sequence (see [`crate::token`])
//! indexed by visible characters. Every operation that cuts the sequence
//! (slicing, line splitting, chunking, wrapping, truncation) produces pieces
//! that render on their own exactly as they looked inside the whole:
//!
//! - the style active at the cut is reopened with its minimal SGR sequence
//!   before the first character of the piece;
//! - the style active at the end of the piece is switched off again with
//!   partial resets, so nothing leaks into whatever is printed next.
//!
//! # Example
//! ```
//! use tinta_style::{Color, Style};
//! use tinta_text::AnsiString;
//!
//! let red = AnsiString::from(Style::new().fg(Color::RED).paint("red").as_str());
//! assert_eq!(red.length(), 3);
//!
//! let r = red.sub_sequence(0, 1).unwrap();
//! assert_eq!(r.to_string(), "\x1b[31mr\x1b[39m");
//! assert_eq!(r.to_plain(), "r");
//! ```

use std::fmt;
use std::ops::{Add, Range};
use std::sync::Arc;

use tinta_style::Style;

use crate::error::{Result, TextError};
use crate::lines::{LineSeparator, line_spans};
use crate::search::contains_with;
use crate::token::{EscapeKind, Token, tokenize};
use crate::token_cache::TokenCache;
use crate::width::{
    self, DEFAULT_PADDING, DEFAULT_TRUNCATION_MARKER, Elision, byte_offset, char_range_by_columns,
    chunk_spans, padding_for, plan_elision,
};

/// Accumulates tokens, merging adjacent text and tracking the length.
#[derive(Debug, Default)]
struct TokenBuilder {
    tokens: Vec<Token>,
    length: usize,
}

impl TokenBuilder {
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let added = text.chars().count();
        self.length += added;
        if let Some(Token::Text { text: last, length }) = self.tokens.last_mut() {
            last.push_str(text);
            *length += added;
            return;
        }
        self.tokens.push(Token::text(text));
    }

    fn push(&mut self, token: &Token) {
        match token {
            Token::Text { text, .. } => self.push_text(text),
            Token::Escape { .. } => self.tokens.push(token.clone()),
        }
    }

    fn push_sgr(&mut self, params: &[u16]) {
        if !params.is_empty() {
            self.tokens.push(Token::sgr(params));
        }
    }

    fn extend(&mut self, other: &AnsiString) {
        for token in other.tokens.iter() {
            self.push(token);
        }
    }

    fn finish(self) -> AnsiString {
        AnsiString {
            tokens: self.tokens.into(),
            length: self.length,
        }
    }
}

fn apply_escape(style: &mut Style, token: &Token) {
    if let Some(params) = token.sgr_params() {
        style.apply(&params);
    }
}

/// Characters `from..to` of `text`.
fn char_slice(text: &str, from: usize, to: usize) -> &str {
    let start = byte_offset(text, from);
    let end = start + byte_offset(&text[start..], to - from);
    &text[start..end]
}

/// Char ranges of the lines of `plain`, separators excluded.
fn line_char_ranges(plain: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut byte = 0;
    let mut chars = 0;
    for span in line_spans(plain) {
        let start = chars + plain[byte..span.bytes.start].chars().count();
        let end = start + plain[span.bytes.clone()].chars().count();
        ranges.push(start..end);
        byte = span.bytes.end;
        chars = end;
    }
    ranges
}

/// A string of text and ANSI escape sequences, indexed by visible characters.
#[derive(Debug, Clone)]
pub struct AnsiString {
    tokens: Arc<[Token]>,
    length: usize,
}

impl AnsiString {
    /// The empty string.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokens: Arc::from(Vec::new()),
            length: 0,
        }
    }

    /// Tokenize `text` through `cache`.
    #[must_use]
    pub fn with_cache(text: &str, cache: &TokenCache) -> Self {
        Self::from_shared(cache.tokenize(text))
    }

    /// Build a string from tokens; adjacent text tokens are merged.
    #[must_use]
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut builder = TokenBuilder::default();
        for token in tokens {
            builder.push(&token);
        }
        builder.finish()
    }

    fn from_shared(tokens: Arc<[Token]>) -> Self {
        let length = tokens.iter().map(Token::length).sum();
        Self { tokens, length }
    }

    /// Number of visible characters.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Whether there are no visible characters (escapes may remain).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Visible characters in order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.tokens
            .iter()
            .filter(|t| !t.is_escape())
            .flat_map(|t| t.raw().chars())
    }

    /// The text without escape sequences.
    #[must_use]
    pub fn to_plain(&self) -> String {
        self.tokens
            .iter()
            .filter(|t| !t.is_escape())
            .map(Token::raw)
            .collect()
    }

    /// The raw form, or the plain text with `remove_ansi`.
    #[must_use]
    pub fn to_string_with(&self, remove_ansi: bool) -> String {
        if remove_ansi {
            self.to_plain()
        } else {
            self.to_string()
        }
    }

    fn out_of_bounds(&self, index: usize) -> TextError {
        TextError::IndexOutOfBounds {
            index,
            length: self.length,
        }
    }

    /// The visible character at `index`.
    ///
    /// # Errors
    /// Returns [`TextError::IndexOutOfBounds`] if `index >= self.length()`.
    pub fn get(&self, index: usize) -> Result<char> {
        let mut pos = 0;
        for token in self.tokens.iter() {
            if let Token::Text { text, length } = token {
                if index < pos + length {
                    return text
                        .chars()
                        .nth(index - pos)
                        .ok_or_else(|| self.out_of_bounds(index));
                }
                pos += length;
            }
        }
        Err(self.out_of_bounds(index))
    }

    /// The style applied to the character at `index`; with
    /// `index == self.length()`, the style left active at the end.
    ///
    /// # Errors
    /// Returns [`TextError::IndexOutOfBounds`] if `index > self.length()`.
    pub fn style_at(&self, index: usize) -> Result<Style> {
        if index > self.length {
            return Err(self.out_of_bounds(index));
        }
        let mut style = Style::new();
        let mut pos = 0;
        for token in self.tokens.iter() {
            match token {
                Token::Escape { .. } => apply_escape(&mut style, token),
                Token::Text { length, .. } => {
                    if index < pos + length {
                        return Ok(style);
                    }
                    pos += length;
                }
            }
        }
        Ok(style)
    }

    fn end_style(&self) -> Style {
        let mut style = Style::new();
        for token in self.tokens.iter() {
            apply_escape(&mut style, token);
        }
        style
    }

    /// Characters `start..end` with their styling, renderable on their own.
    ///
    /// Escapes before `start` are folded into one reopening sequence, followed
    /// by the hyperlink open at `start` if there is one. Escapes inside the
    /// range are kept as they are. SGR escapes at or after `end` are replaced
    /// by the partial resets for the style active at the cut, and a hyperlink
    /// still open there is ended.
    ///
    /// # Errors
    /// Returns [`TextError::InvalidArgument`] if `start > end` and
    /// [`TextError::IndexOutOfBounds`] if `end > self.length()`.
    pub fn sub_sequence(&self, start: usize, end: usize) -> Result<Self> {
        if start > end {
            return Err(TextError::invalid_argument(
                "start",
                format!("start {start} is greater than end {end}"),
            ));
        }
        if end > self.length {
            return Err(self.out_of_bounds(end));
        }
        Ok(self.slice(start, end))
    }

    /// [`AnsiString::sub_sequence`] for a range known to be valid.
    fn slice(&self, start: usize, end: usize) -> Self {
        let mut out = TokenBuilder::default();
        if start >= end {
            return out.finish();
        }

        let mut style = Style::new();
        let mut link: Option<&Token> = None;
        let mut pos = 0;
        let mut opened = false;
        for token in self.tokens.iter() {
            match token {
                Token::Escape { kind, .. } => {
                    if pos > end {
                        break;
                    }
                    if *kind == EscapeKind::Sgr {
                        if pos == end {
                            continue;
                        }
                        if opened {
                            out.push(token);
                        }
                        apply_escape(&mut style, token);
                    } else if let Some(target) = token.hyperlink_target() {
                        link = (!target.is_empty()).then_some(token);
                        if opened {
                            out.push(token);
                        }
                    } else if opened || pos == start {
                        out.push(token);
                    }
                }
                Token::Text { text, length } => {
                    if pos >= end {
                        break;
                    }
                    let token_end = pos + length;
                    if token_end > start {
                        if !opened {
                            out.push_sgr(&style.open_params());
                            if let Some(link) = link {
                                out.push(link);
                            }
                            opened = true;
                        }
                        let from = start.saturating_sub(pos);
                        let to = end.min(token_end) - pos;
                        out.push_text(char_slice(text, from, to));
                    }
                    pos = token_end;
                }
            }
        }
        out.push_sgr(&style.close_params());
        if opened && link.is_some() {
            out.push(&Token::hyperlink_close());
        }
        out.finish()
    }

    /// Append `other`, switching off this string's trailing style first.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let mut out = TokenBuilder::default();
        out.extend(self);
        out.push_sgr(&self.end_style().close_params());
        out.extend(other);
        out.finish()
    }

    /// Whether the visible text is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.chars().all(char::is_whitespace)
    }

    #[must_use]
    pub fn is_not_blank(&self) -> bool {
        !self.is_blank()
    }

    /// Search the raw form, or the visible text with `ignore_ansi`.
    ///
    /// See [`contains_with`] for how the flags combine.
    #[must_use]
    pub fn contains(&self, needle: &str, ignore_case: bool, ignore_ansi: bool) -> bool {
        if ignore_ansi {
            contains_with(&self.to_plain(), needle, ignore_case, true)
        } else {
            contains_with(&self.to_string(), needle, ignore_case, false)
        }
    }

    /// Replace the text of every text token, keeping the escapes.
    #[must_use]
    pub fn map_text<F>(&self, mut transform: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        let mut out = TokenBuilder::default();
        for token in self.tokens.iter() {
            match token {
                Token::Text { text, .. } => out.push_text(&transform(text)),
                Token::Escape { .. } => out.push(token),
            }
        }
        out.finish()
    }

    #[must_use]
    pub fn to_uppercase(&self) -> Self {
        self.map_text(|text| text.to_uppercase())
    }

    #[must_use]
    pub fn to_lowercase(&self) -> Self {
        self.map_text(|text| text.to_lowercase())
    }

    /// Terminal columns of the visible text.
    #[must_use]
    pub fn columns(&self) -> usize {
        width::columns(&self.to_plain())
    }

    /// Character index at which `column` is first reached, see
    /// [`crate::find_index_by_columns`].
    #[must_use]
    pub fn find_index_by_columns(&self, column: usize) -> Option<usize> {
        width::find_index_by_columns(&self.to_plain(), column)
    }

    /// Slice by columns, widening boundaries that fall inside wide clusters.
    ///
    /// # Errors
    /// Returns [`TextError::InvalidArgument`] if `start > end` or `end`
    /// exceeds [`AnsiString::columns`].
    pub fn sub_sequence_by_columns(&self, start: usize, end: usize) -> Result<Self> {
        let chars = char_range_by_columns(&self.to_plain(), start, end)?;
        Ok(self.slice(chars.start, chars.end))
    }

    fn padded(&self, padding: &str, at_start: bool) -> Self {
        let mut out = TokenBuilder::default();
        if at_start {
            out.push_text(padding);
        }
        out.extend(self);
        if !at_start {
            out.push_text(padding);
        }
        out.finish()
    }

    /// Pad on the left with spaces to `target` columns.
    #[must_use]
    pub fn pad_start_by_columns(&self, target: usize) -> Self {
        let padding = DEFAULT_PADDING.repeat(target.saturating_sub(self.columns()));
        self.padded(&padding, true)
    }

    /// Pad on the left with repetitions of `pad`, never exceeding `target`.
    ///
    /// # Errors
    /// Returns [`TextError::InvalidArgument`] if `pad` occupies no columns.
    pub fn pad_start_by_columns_with(&self, target: usize, pad: &str) -> Result<Self> {
        let padding = padding_for(self.columns(), target, pad)?;
        Ok(self.padded(&padding, true))
    }

    /// Pad on the right with spaces to `target` columns.
    #[must_use]
    pub fn pad_end_by_columns(&self, target: usize) -> Self {
        let padding = DEFAULT_PADDING.repeat(target.saturating_sub(self.columns()));
        self.padded(&padding, false)
    }

    /// Pad on the right with repetitions of `pad`, never exceeding `target`.
    ///
    /// # Errors
    /// Returns [`TextError::InvalidArgument`] if `pad` occupies no columns.
    pub fn pad_end_by_columns_with(&self, target: usize, pad: &str) -> Result<Self> {
        let padding = padding_for(self.columns(), target, pad)?;
        Ok(self.padded(&padding, false))
    }

    fn elide(&self, max: usize, marker: &str, elision: Elision) -> Result<Self> {
        let plain = self.to_plain();
        let Some((head, tail)) = plan_elision(&plain, max, marker, elision)? else {
            return Ok(self.clone());
        };
        let mut out = TokenBuilder::default();
        out.extend(&self.slice(head.start, head.end));
        for token in tokenize(marker) {
            out.push(&token);
        }
        out.extend(&self.slice(tail.start, tail.end));
        Ok(out.finish())
    }

    /// Shorten to `max` columns by replacing the middle with `" … "`.
    ///
    /// # Errors
    /// Returns [`TextError::InvalidArgument`] if the marker is wider than `max`.
    pub fn truncate_by_columns(&self, max: usize) -> Result<Self> {
        self.elide(max, DEFAULT_TRUNCATION_MARKER, Elision::Middle)
    }

    /// # Errors
    /// Returns [`TextError::InvalidArgument`] if `marker` is wider than `max`.
    pub fn truncate_by_columns_with(&self, max: usize, marker: &str) -> Result<Self> {
        self.elide(max, marker, Elision::Middle)
    }

    /// Shorten to `max` columns by replacing the start with `" … "`.
    ///
    /// # Errors
    /// Returns [`TextError::InvalidArgument`] if the marker is wider than `max`.
    pub fn truncate_start_by_columns(&self, max: usize) -> Result<Self> {
        self.elide(max, DEFAULT_TRUNCATION_MARKER, Elision::Start)
    }

    /// # Errors
    /// Returns [`TextError::InvalidArgument`] if `marker` is wider than `max`.
    pub fn truncate_start_by_columns_with(&self, max: usize, marker: &str) -> Result<Self> {
        self.elide(max, marker, Elision::Start)
    }

    /// Shorten to `max` columns by replacing the end with `" … "`.
    ///
    /// # Errors
    /// Returns [`TextError::InvalidArgument`] if the marker is wider than `max`.
    pub fn truncate_end_by_columns(&self, max: usize) -> Result<Self> {
        self.elide(max, DEFAULT_TRUNCATION_MARKER, Elision::End)
    }

    /// # Errors
    /// Returns [`TextError::InvalidArgument`] if `marker` is wider than `max`.
    pub fn truncate_end_by_columns_with(&self, max: usize, marker: &str) -> Result<Self> {
        self.elide(max, marker, Elision::End)
    }

    /// Split into pieces of at most `width` columns, each styled on its own.
    ///
    /// # Errors
    /// Returns [`TextError::InvalidArgument`] if `width` is zero.
    pub fn chunked_by_columns(&self, width: usize) -> Result<Vec<Self>> {
        let chunks = chunk_spans(&self.to_plain(), width)?;
        Ok(chunks
            .into_iter()
            .map(|chunk| self.slice(chunk.chars.start, chunk.chars.end))
            .collect())
    }

    /// Lines without separators, each styled on its own.
    ///
    /// A trailing separator yields a trailing empty line.
    #[must_use]
    pub fn lines(&self) -> Vec<Self> {
        line_char_ranges(&self.to_plain())
            .into_iter()
            .map(|range| self.slice(range.start, range.end))
            .collect()
    }

    /// Hard-wrap every line at `width` columns, keeping styles per fragment.
    ///
    /// Fragments cut short before a cluster that would not fit are padded
    /// with unstyled spaces. Lines are joined with
    /// [`LineSeparator::DEFAULT`]; a trailing separator is kept.
    ///
    /// # Errors
    /// Returns [`TextError::InvalidArgument`] if `width` is zero.
    pub fn wrap_lines(&self, width: usize) -> Result<Self> {
        if width == 0 {
            return Err(TextError::invalid_argument(
                "width",
                "wrap width must be at least one column",
            ));
        }
        let separator = LineSeparator::DEFAULT.as_str();
        let plain = self.to_plain();
        let mut ranges = line_char_ranges(&plain);
        let trailing = ranges.len() > 1 && ranges.last().is_some_and(Range::is_empty);
        if trailing {
            ranges.pop();
        }

        let mut out = TokenBuilder::default();
        for (i, line) in ranges.iter().enumerate() {
            if i > 0 {
                out.push_text(separator);
            }
            let line_text = char_slice(&plain, line.start, line.end);
            for (j, chunk) in chunk_spans(line_text, width)?.into_iter().enumerate() {
                if j > 0 {
                    out.push_text(separator);
                }
                let chars = line.start + chunk.chars.start..line.start + chunk.chars.end;
                out.extend(&self.slice(chars.start, chars.end));
                if chunk.overflowed {
                    out.push_text(&" ".repeat(width - chunk.columns));
                }
            }
        }
        if trailing {
            out.push_text(separator);
        }
        Ok(out.finish())
    }
}

impl Default for AnsiString {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for AnsiString {
    /// Tokenize `text`, through the process-wide cache when the
    /// `global_cache` feature is enabled.
    fn from(text: &str) -> Self {
        #[cfg(feature = "global_cache")]
        {
            Self::with_cache(text, TokenCache::global())
        }
        #[cfg(not(feature = "global_cache"))]
        {
            Self::from_tokens(tokenize(text))
        }
    }
}

impl From<String> for AnsiString {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<&String> for AnsiString {
    fn from(text: &String) -> Self {
        Self::from(text.as_str())
    }
}

impl fmt::Display for AnsiString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in self.tokens.iter() {
            f.write_str(token.raw())?;
        }
        Ok(())
    }
}

impl PartialEq for AnsiString {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.to_string() == other.to_string()
    }
}

impl Eq for AnsiString {}

impl Add<&AnsiString> for &AnsiString {
    type Output = AnsiString;

    fn add(self, rhs: &AnsiString) -> AnsiString {
        self.concat(rhs)
    }
}

impl Add for AnsiString {
    type Output = AnsiString;

    fn add(self, rhs: AnsiString) -> AnsiString {
        self.concat(&rhs)
    }
}

impl Add<&str> for &AnsiString {
    type Output = AnsiString;

    fn add(self, rhs: &str) -> AnsiString {
        self.concat(&AnsiString::from(rhs))
    }
}

impl Add<&str> for AnsiString {
    type Output = AnsiString;

    fn add(self, rhs: &str) -> AnsiString {
        self.concat(&AnsiString::from(rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinta_style::{Color, StyleFlags};

    const SENTENCE: &str = "\x1b[3;36m\x1b[4mImportant:\x1b[24m This line has \x1b[9mno\x1b[29m ANSI escapes.\x1b[23;39m";

    fn ansi(text: &str) -> AnsiString {
        AnsiString::with_cache(text, &TokenCache::new())
    }

    #[test]
    fn logical_length_ignores_escapes() {
        let s = ansi(SENTENCE);
        assert_eq!(s.length(), 41);
        assert_eq!(s.to_plain().chars().count(), 41);
        assert_eq!(s.to_string(), SENTENCE);
        assert_eq!(s.to_string_with(true), "Important: This line has no ANSI escapes.");
    }

    #[test]
    fn empty_string() {
        let s = AnsiString::new();
        assert!(s.is_empty());
        assert!(s.is_blank());
        assert_eq!(s.to_string(), "");
        assert_eq!(s, AnsiString::default());
    }

    #[test]
    fn get_walks_text_tokens() {
        let s = ansi("ab\x1b[1mcd\x1b[22m");
        assert_eq!(s.get(0), Ok('a'));
        assert_eq!(s.get(2), Ok('c'));
        assert_eq!(s.get(3), Ok('d'));
        assert_eq!(
            s.get(4),
            Err(TextError::IndexOutOfBounds {
                index: 4,
                length: 4
            })
        );
    }

    #[test]
    fn slice_reopens_style_at_cut() {
        let red = ansi(&Style::new().fg(Color::RED).paint("red"));
        let r = red.sub_sequence(0, 1).unwrap();
        assert_eq!(r.to_string(), "\x1b[31mr\x1b[39m");
        let d = red.sub_sequence(2, 3).unwrap();
        assert_eq!(d.to_string(), "\x1b[31md\x1b[39m");
    }

    #[test]
    fn slice_keeps_inner_escapes() {
        let s = ansi("ab\x1b[1mcd\x1b[22mef");
        assert_eq!(s.sub_sequence(1, 5).unwrap().to_string(), "b\x1b[1mcd\x1b[22me");
        assert_eq!(s.sub_sequence(3, 4).unwrap().to_string(), "\x1b[1md\x1b[22m");
        assert_eq!(s.sub_sequence(0, 6).unwrap(), s);
    }

    #[test]
    fn slice_folds_prefix_styles() {
        let s = ansi(SENTENCE);
        assert_eq!(
            s.sub_sequence(0, 10).unwrap().to_string(),
            "\x1b[3;4;36mImportant:\x1b[23;24;39m"
        );
        assert_eq!(
            s.sub_sequence(25, 27).unwrap().to_string(),
            "\x1b[3;9;36mno\x1b[23;29;39m"
        );
    }

    #[test]
    fn empty_slice_has_no_escapes() {
        let s = ansi("\x1b[31mred\x1b[39m");
        assert_eq!(s.sub_sequence(1, 1).unwrap().to_string(), "");
    }

    #[test]
    fn slice_rejects_bad_ranges() {
        let s = ansi("abc");
        assert!(matches!(
            s.sub_sequence(2, 1),
            Err(TextError::InvalidArgument { name: "start", .. })
        ));
        assert_eq!(
            s.sub_sequence(0, 4),
            Err(TextError::IndexOutOfBounds {
                index: 4,
                length: 3
            })
        );
    }

    #[test]
    fn slice_keeps_hyperlink_at_start() {
        let s = ansi("x\x1b]8;;u\x07link\x1b]8;;\x07");
        assert_eq!(
            s.sub_sequence(1, 5).unwrap().to_string(),
            "\x1b]8;;u\x07link\x1b]8;;\x07"
        );
    }

    #[test]
    fn slice_reopens_hyperlink_it_starts_inside() {
        let s = ansi("x\x1b]8;;u\x07link\x1b]8;;\x07y");
        assert_eq!(
            s.sub_sequence(2, 4).unwrap().to_string(),
            "\x1b]8;;u\x07in\x1b]8;;\x1b\\"
        );
        assert_eq!(
            s.sub_sequence(3, 6).unwrap().to_string(),
            "\x1b]8;;u\x07nk\x1b]8;;\x07y"
        );
        assert_eq!(s.sub_sequence(5, 6).unwrap().to_string(), "y");
        assert_eq!(s.sub_sequence(0, 1).unwrap().to_string(), "x");
    }

    #[test]
    fn hyperlink_survives_line_splitting() {
        let s = ansi("\x1b]8;;u\x07one\ntwo\x1b]8;;\x07");
        let lines: Vec<String> = s.lines().iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "\x1b]8;;u\x07one\x1b]8;;\x1b\\",
                "\x1b]8;;u\x07two\x1b]8;;\x07"
            ]
        );
    }

    #[test]
    fn slice_keeps_colon_form_attributes() {
        let wavy = ansi("\x1b[4:3mwavy\x1b[4:0m");
        let w = wavy.sub_sequence(0, 1).unwrap();
        assert_eq!(w.to_string(), "\x1b[4mw\x1b[24m");
        assert_eq!(w.style_at(0).unwrap().flags, StyleFlags::UNDERLINE);

        let rgb = ansi("\x1b[38:2::10:20:30mrgb\x1b[39m");
        let r = rgb.sub_sequence(0, 1).unwrap();
        assert_eq!(r.to_string(), "\x1b[38;2;10;20;30mr\x1b[39m");
        assert_eq!(r.style_at(0).unwrap().fg, Some(Color::rgb(10, 20, 30)));
        assert_eq!(rgb.style_at(2).unwrap(), Style::new().fg(Color::rgb(10, 20, 30)));
    }

    #[test]
    fn style_at_positions() {
        let s = ansi("a\x1b[1;31mb\x1b[22mc");
        assert_eq!(s.style_at(0).unwrap(), Style::new());
        assert_eq!(s.style_at(1).unwrap(), Style::new().bold().fg(Color::RED));
        assert_eq!(s.style_at(2).unwrap(), Style::new().fg(Color::RED));
        assert_eq!(s.style_at(3).unwrap(), Style::new().fg(Color::RED));
        assert!(s.style_at(4).is_err());
    }

    #[test]
    fn concatenation_closes_open_style() {
        let left = ansi("\x1b[31mred");
        let joined = &left + "plain";
        assert_eq!(joined.to_string(), "\x1b[31mred\x1b[39mplain");
        assert_eq!(joined.length(), 8);
        assert_eq!(joined.style_at(3).unwrap(), Style::new());
    }

    #[test]
    fn concatenation_of_plain_merges_text() {
        let joined = ansi("ab") + ansi("cd");
        assert_eq!(joined.tokens().len(), 1);
        assert_eq!(joined.to_string(), "abcd");
    }

    #[test]
    fn blankness_ignores_escapes() {
        assert!(ansi("\x1b[1m  \x1b[22m").is_blank());
        assert!(ansi("\x1b[1m x \x1b[22m").is_not_blank());
    }

    #[test]
    fn contains_combinations() {
        let s = ansi("Say \x1b[31mHELLO\x1b[39m");
        assert!(s.contains("HELLO", false, false));
        assert!(!s.contains("Say HELLO", false, false));
        assert!(s.contains("say hello", true, true));
        assert!(!s.contains("say hello", false, true));
        assert!(s.contains("\x1b[31mhello", true, false));
    }

    #[test]
    fn text_mapping_keeps_escapes() {
        let s = ansi("\x1b[1mbold\x1b[22m and plain");
        assert_eq!(s.to_uppercase().to_string(), "\x1b[1mBOLD\x1b[22m AND PLAIN");
        assert_eq!(s.to_uppercase().to_lowercase(), s);
        let doubled = s.map_text(|t| t.repeat(2));
        assert_eq!(doubled.length(), s.length() * 2);
    }

    #[test]
    fn column_operations() {
        let s = ansi("\x1b[32m中文ab\x1b[39m");
        assert_eq!(s.columns(), 6);
        assert_eq!(s.find_index_by_columns(4), Some(2));
        assert_eq!(
            s.sub_sequence_by_columns(1, 3).unwrap().to_string(),
            "\x1b[32m中文\x1b[39m"
        );
        assert!(s.sub_sequence_by_columns(0, 7).is_err());
    }

    #[test]
    fn padding() {
        let s = ansi("\x1b[1mab\x1b[22m");
        assert_eq!(s.pad_start_by_columns(4).to_string(), "  \x1b[1mab\x1b[22m");
        assert_eq!(s.pad_end_by_columns(4).to_string(), "\x1b[1mab\x1b[22m  ");
        assert_eq!(
            s.pad_end_by_columns_with(7, "-=").unwrap().to_string(),
            "\x1b[1mab\x1b[22m-=-="
        );
        assert!(s.pad_start_by_columns_with(5, "").is_err());
        assert_eq!(s.pad_end_by_columns(1), s);
    }

    #[test]
    fn truncation_keeps_styles_self_contained() {
        let s = ansi("\x1b[31m1234567890\x1b[39m");
        let middle = s.truncate_by_columns(7).unwrap();
        assert_eq!(middle.to_string(), "\x1b[31m12\x1b[39m … \x1b[31m90\x1b[39m");
        assert_eq!(middle.columns(), 7);
        let end = s.truncate_end_by_columns_with(5, "…").unwrap();
        assert_eq!(end.to_plain(), "1234…");
        let start = s.truncate_start_by_columns(7).unwrap();
        assert_eq!(start.to_plain(), " … 7890");
        assert_eq!(s.truncate_by_columns(20).unwrap(), s);
        assert!(s.truncate_by_columns(2).is_err());
    }

    #[test]
    fn chunks_are_independently_styled() {
        let s = ansi("\x1b[4mabcde\x1b[24m");
        let chunks: Vec<String> = s
            .chunked_by_columns(2)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            chunks,
            vec!["\x1b[4mab\x1b[24m", "\x1b[4mcd\x1b[24m", "\x1b[4me\x1b[24m"]
        );
        assert!(s.chunked_by_columns(0).is_err());
    }

    #[test]
    fn lines_carry_style_across_separators() {
        let s = ansi("\x1b[31mone\ntwo\x1b[39m\n");
        let lines: Vec<String> = s.lines().iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec!["\x1b[31mone\x1b[39m", "\x1b[31mtwo\x1b[39m", ""]
        );
    }

    #[test]
    fn wrapping_styled_text() {
        let s = ansi("\x1b[32m12345😀7890\x1b[39m\n");
        let wrapped = s.wrap_lines(3).unwrap();
        assert_eq!(
            wrapped.to_string(),
            "\x1b[32m123\x1b[39m\n\x1b[32m45\x1b[39m \n\x1b[32m😀7\x1b[39m\n\x1b[32m890\x1b[39m\n"
        );
        assert_eq!(wrapped.to_plain(), "123\n45 \n😀7\n890\n");
        assert_eq!(wrapped.wrap_lines(3).unwrap(), wrapped);
        assert!(s.wrap_lines(0).is_err());
    }

    #[test]
    fn tokens_from_parts() {
        let s = AnsiString::from_tokens([
            Token::sgr(&[1]),
            Token::text("a"),
            Token::text("b"),
            Token::sgr(&[22]),
        ]);
        assert_eq!(s.tokens().len(), 3);
        assert_eq!(s.style_at(0).unwrap().flags, StyleFlags::BOLD);
    }

    #[test]
    fn shared_cache_reuses_tokens() {
        let cache = TokenCache::new();
        let a = AnsiString::with_cache("\x1b[1mx", &cache);
        let b = AnsiString::with_cache("\x1b[1mx", &cache);
        assert_eq!(a, b);
        assert_eq!(cache.stats().hits, 1);
    }
}
