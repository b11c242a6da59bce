#![forbid(unsafe_code)]

//! Terminal column widths.
//!
//! Every grapheme cluster occupies 0, 1 or 2 columns. The width of a string
//! is the sum of the widths of its clusters, so column-addressed operations
//! here never split a cluster:
//!
//! - [`columns`] / [`find_index_by_columns`] measure
//! - [`sub_sequence_by_columns`] slices, widening boundaries that fall inside
//!   a wide cluster
//! - [`pad_start_by_columns`] / [`pad_end_by_columns`] pad without overshooting
//! - [`truncate_by_columns`] and its start/end variants elide with a marker
//! - [`chunked_by_columns`] splits into fixed-width pieces
//!
//! These functions work on plain text. Escape sequences are measured like
//! any other control character (0 columns); use
//! [`AnsiString`](crate::AnsiString) for styled text.
//!
//! # Example
//! ```
//! use tinta_text::{columns, sub_sequence_by_columns, truncate_by_columns};
//!
//! assert_eq!(columns("a\u{0333}o"), 2);
//! assert_eq!(columns("日本"), 4);
//! // Column 1 falls inside "日", so the whole cluster is kept.
//! assert_eq!(sub_sequence_by_columns("日本", 1, 2).unwrap(), "日");
//! assert_eq!(truncate_by_columns("1234567890", 7).unwrap(), "12 … 90");
//! ```

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::{Result, TextError};
use crate::lines::is_line_separator_char;

/// Marker inserted by the truncation functions unless another one is given.
pub const DEFAULT_TRUNCATION_MARKER: &str = " … ";

/// Padding unit used by the padding functions unless another one is given.
pub const DEFAULT_PADDING: &str = " ";

/// Columns of a single code point: -1 for controls, 0 for zero-width
/// characters and line separators, 1 or 2 otherwise.
#[must_use]
pub fn code_point_columns(c: char) -> i8 {
    if is_line_separator_char(c) {
        return 0;
    }
    if c.is_control() {
        return -1;
    }
    match UnicodeWidthChar::width(c) {
        Some(0) => 0,
        Some(1) => 1,
        Some(_) => 2,
        None => -1,
    }
}

#[inline]
fn is_invisible(c: char) -> bool {
    c.is_control() || is_line_separator_char(c)
}

/// Columns of one grapheme cluster (0, 1 or 2).
///
/// Controls and line separators contribute nothing; the visible code points
/// are measured together so emoji sequences count as one wide glyph.
#[must_use]
pub fn grapheme_columns(cluster: &str) -> usize {
    let width = if cluster.chars().any(is_invisible) {
        cluster
            .chars()
            .filter(|&c| !is_invisible(c))
            .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
            .sum()
    } else {
        UnicodeWidthStr::width(cluster)
    };
    width.min(2)
}

/// Whether `text` is printable ASCII only, where columns equal bytes.
#[inline]
fn is_printable_ascii(text: &str) -> bool {
    text.bytes().all(|b| (0x20..0x7F).contains(&b))
}

/// Total columns of `text`.
#[must_use]
pub fn columns(text: &str) -> usize {
    if is_printable_ascii(text) {
        return text.len();
    }
    text.graphemes(true).map(grapheme_columns).sum()
}

/// One grapheme cluster located in its source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClusterSpan {
    pub chars: Range<usize>,
    pub columns: Range<usize>,
}

impl ClusterSpan {
    #[inline]
    pub(crate) fn width(&self) -> usize {
        self.columns.end - self.columns.start
    }
}

/// Locate every grapheme cluster of `text` by char and column range.
pub(crate) fn cluster_spans(text: &str) -> impl Iterator<Item = ClusterSpan> + '_ {
    let mut char_pos = 0;
    let mut column_pos = 0;
    text.graphemes(true).map(move |cluster| {
        let chars = cluster.chars().count();
        let width = grapheme_columns(cluster);
        let span = ClusterSpan {
            chars: char_pos..char_pos + chars,
            columns: column_pos..column_pos + width,
        };
        char_pos += chars;
        column_pos += width;
        span
    })
}

/// Byte offset of the character at `char_index` (or `text.len()` past the end).
pub(crate) fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Character index at which `column` is first reached.
///
/// Returns `None` if `column` exceeds the total columns of `text`. When the
/// column falls inside a wide cluster, the index after that cluster is
/// returned.
#[must_use]
pub fn find_index_by_columns(text: &str, column: usize) -> Option<usize> {
    let mut reached = 0;
    let mut index = 0;
    for span in cluster_spans(text) {
        if reached >= column {
            return Some(index);
        }
        reached = span.columns.end;
        index = span.chars.end;
    }
    (reached >= column).then_some(index)
}

/// Character range covering columns `start..end`, widened to whole clusters.
pub(crate) fn char_range_by_columns(text: &str, start: usize, end: usize) -> Result<Range<usize>> {
    if start > end {
        return Err(TextError::invalid_argument(
            "start_column",
            format!("start column {start} is greater than end column {end}"),
        ));
    }
    let total = columns(text);
    if end > total {
        return Err(TextError::invalid_argument(
            "end_column",
            format!("end column {end} exceeds the {total} columns of the text"),
        ));
    }
    if start == end {
        return Ok(0..0);
    }
    let mut range: Option<Range<usize>> = None;
    for span in cluster_spans(text) {
        let overlaps = span.columns.start < end && span.columns.end > start;
        let zero_width_inside =
            span.width() == 0 && start <= span.columns.start && span.columns.start < end;
        if overlaps || zero_width_inside {
            match range.as_mut() {
                Some(r) => r.end = span.chars.end,
                None => range = Some(span.chars.clone()),
            }
        } else if span.columns.start >= end {
            break;
        }
    }
    Ok(range.unwrap_or(0..0))
}

/// Slice `text` by columns `start..end`.
///
/// A boundary falling inside a wide cluster includes the whole cluster, so
/// the result may be wider than `end - start`.
///
/// # Errors
/// Returns [`TextError::InvalidArgument`] if `start > end` or `end` exceeds
/// the total columns of `text`.
pub fn sub_sequence_by_columns(text: &str, start: usize, end: usize) -> Result<&str> {
    let chars = char_range_by_columns(text, start, end)?;
    if chars.is_empty() {
        return Ok("");
    }
    let from = byte_offset(text, chars.start);
    let to = from + byte_offset(&text[from..], chars.end - chars.start);
    Ok(&text[from..to])
}

/// Owned variant of [`sub_sequence_by_columns`].
///
/// # Errors
/// Same as [`sub_sequence_by_columns`].
pub fn substring_by_columns(text: &str, start: usize, end: usize) -> Result<String> {
    sub_sequence_by_columns(text, start, end).map(str::to_owned)
}

/// Padding that brings `current` columns towards `target` without exceeding it.
pub(crate) fn padding_for(current: usize, target: usize, pad: &str) -> Result<String> {
    let unit = columns(pad);
    if unit == 0 {
        return Err(TextError::invalid_argument(
            "pad",
            format!("padding {pad:?} occupies no columns"),
        ));
    }
    Ok(pad.repeat(target.saturating_sub(current) / unit))
}

/// Pad `text` on the left with spaces to `target` columns.
#[must_use]
pub fn pad_start_by_columns(text: &str, target: usize) -> String {
    let padding = DEFAULT_PADDING.repeat(target.saturating_sub(columns(text)));
    padding + text
}

/// Pad `text` on the left with repetitions of `pad` up to `target` columns.
///
/// # Errors
/// Returns [`TextError::InvalidArgument`] if `pad` occupies no columns.
pub fn pad_start_by_columns_with(text: &str, target: usize, pad: &str) -> Result<String> {
    Ok(padding_for(columns(text), target, pad)? + text)
}

/// Pad `text` on the right with spaces to `target` columns.
#[must_use]
pub fn pad_end_by_columns(text: &str, target: usize) -> String {
    let padding = DEFAULT_PADDING.repeat(target.saturating_sub(columns(text)));
    let mut out = String::with_capacity(text.len() + padding.len());
    out.push_str(text);
    out.push_str(&padding);
    out
}

/// Pad `text` on the right with repetitions of `pad` up to `target` columns.
///
/// # Errors
/// Returns [`TextError::InvalidArgument`] if `pad` occupies no columns.
pub fn pad_end_by_columns_with(text: &str, target: usize, pad: &str) -> Result<String> {
    let padding = padding_for(columns(text), target, pad)?;
    let mut out = String::with_capacity(text.len() + padding.len());
    out.push_str(text);
    out.push_str(&padding);
    Ok(out)
}

/// Which part of an over-long text is replaced by the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Elision {
    Start,
    Middle,
    End,
}

/// Characters kept on each side when eliding text to `max` columns.
///
/// Returns `None` when the text already fits. Otherwise the first range is
/// the kept head and the second the kept tail, both as char indices.
pub(crate) fn plan_elision(
    text: &str,
    max: usize,
    marker: &str,
    elision: Elision,
) -> Result<Option<(Range<usize>, Range<usize>)>> {
    let marker_columns = columns(marker);
    if marker_columns > max {
        return Err(TextError::invalid_argument(
            "marker",
            format!("marker {marker:?} is wider than {max} columns"),
        ));
    }
    let spans: Vec<ClusterSpan> = cluster_spans(text).collect();
    let total = spans.last().map_or(0, |s| s.columns.end);
    if total <= max {
        return Ok(None);
    }

    let budget = max - marker_columns;
    let (head_budget, tail_budget) = match elision {
        Elision::Start => (0, budget),
        Elision::Middle => (budget - budget / 2, budget / 2),
        Elision::End => (budget, 0),
    };

    let head_end = spans
        .iter()
        .take_while(|s| s.columns.end <= head_budget)
        .last()
        .map_or(0, |s| s.chars.end);
    let char_total = spans.last().map_or(0, |s| s.chars.end);
    let tail_start = spans
        .iter()
        .rev()
        .take_while(|s| total - s.columns.start <= tail_budget)
        .last()
        .map_or(char_total, |s| s.chars.start)
        .max(head_end);

    Ok(Some((0..head_end, tail_start..char_total)))
}

fn elide(text: &str, max: usize, marker: &str, elision: Elision) -> Result<String> {
    let Some((head, tail)) = plan_elision(text, max, marker, elision)? else {
        return Ok(text.to_owned());
    };
    let head_bytes = byte_offset(text, head.end);
    let tail_bytes = byte_offset(text, tail.start);
    let mut out = String::with_capacity(head_bytes + marker.len() + text.len() - tail_bytes);
    out.push_str(&text[..head_bytes]);
    out.push_str(marker);
    out.push_str(&text[tail_bytes..]);
    Ok(out)
}

/// Shorten `text` to at most `max` columns by replacing its middle with
/// [`DEFAULT_TRUNCATION_MARKER`].
///
/// # Errors
/// Returns [`TextError::InvalidArgument`] if the marker is wider than `max`.
pub fn truncate_by_columns(text: &str, max: usize) -> Result<String> {
    elide(text, max, DEFAULT_TRUNCATION_MARKER, Elision::Middle)
}

/// Like [`truncate_by_columns`] with a custom marker.
///
/// # Errors
/// Returns [`TextError::InvalidArgument`] if `marker` is wider than `max`.
pub fn truncate_by_columns_with(text: &str, max: usize, marker: &str) -> Result<String> {
    elide(text, max, marker, Elision::Middle)
}

/// Shorten `text` to at most `max` columns by replacing its start.
///
/// # Errors
/// Returns [`TextError::InvalidArgument`] if the marker is wider than `max`.
pub fn truncate_start_by_columns(text: &str, max: usize) -> Result<String> {
    elide(text, max, DEFAULT_TRUNCATION_MARKER, Elision::Start)
}

/// Like [`truncate_start_by_columns`] with a custom marker.
///
/// # Errors
/// Returns [`TextError::InvalidArgument`] if `marker` is wider than `max`.
pub fn truncate_start_by_columns_with(text: &str, max: usize, marker: &str) -> Result<String> {
    elide(text, max, marker, Elision::Start)
}

/// Shorten `text` to at most `max` columns by replacing its end.
///
/// # Errors
/// Returns [`TextError::InvalidArgument`] if the marker is wider than `max`.
pub fn truncate_end_by_columns(text: &str, max: usize) -> Result<String> {
    elide(text, max, DEFAULT_TRUNCATION_MARKER, Elision::End)
}

/// Like [`truncate_end_by_columns`] with a custom marker.
///
/// # Errors
/// Returns [`TextError::InvalidArgument`] if `marker` is wider than `max`.
pub fn truncate_end_by_columns_with(text: &str, max: usize, marker: &str) -> Result<String> {
    elide(text, max, marker, Elision::End)
}

/// A chunk produced by [`chunk_spans`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChunkSpan {
    pub chars: Range<usize>,
    pub columns: usize,
    /// The chunk ended because the next cluster would not fit.
    pub overflowed: bool,
}

/// Greedy packing of whole clusters into chunks of at most `width` columns.
///
/// A cluster wider than `width` gets a chunk of its own.
pub(crate) fn chunk_spans(text: &str, width: usize) -> Result<Vec<ChunkSpan>> {
    if width == 0 {
        return Err(TextError::invalid_argument(
            "columns",
            "chunk width must be at least one column",
        ));
    }
    let mut chunks = Vec::new();
    let mut current: Option<ChunkSpan> = None;
    for span in cluster_spans(text) {
        let w = span.width();
        match current.as_mut() {
            Some(chunk) if chunk.columns + w <= width => {
                chunk.chars.end = span.chars.end;
                chunk.columns += w;
            }
            Some(chunk) => {
                chunk.overflowed = chunk.columns < width;
                let done = std::mem::replace(
                    chunk,
                    ChunkSpan {
                        chars: span.chars.clone(),
                        columns: w,
                        overflowed: false,
                    },
                );
                chunks.push(done);
            }
            None => {
                current = Some(ChunkSpan {
                    chars: span.chars.clone(),
                    columns: w,
                    overflowed: false,
                });
            }
        }
    }
    chunks.extend(current);
    Ok(chunks)
}

/// Split `text` into consecutive pieces of at most `width` columns.
///
/// Grapheme clusters are never separated; a cluster wider than `width` forms
/// a piece of its own. Empty input yields no pieces.
///
/// # Errors
/// Returns [`TextError::InvalidArgument`] if `width` is zero.
pub fn chunked_by_columns(text: &str, width: usize) -> Result<Vec<&str>> {
    let chunks = chunk_spans(text, width)?;
    let mut pieces = Vec::with_capacity(chunks.len());
    let mut rest = text;
    for chunk in chunks {
        let len = byte_offset(rest, chunk.chars.end - chunk.chars.start);
        let (piece, tail) = rest.split_at(len);
        pieces.push(piece);
        rest = tail;
    }
    Ok(pieces)
}
