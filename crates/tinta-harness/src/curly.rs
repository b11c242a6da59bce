#![forbid(unsafe_code)]

//! Curly patterns.
//!
//! A curly pattern is literal text with two kinds of wildcards:
//! - `{}` matches any run of characters on a single line
//! - `{{}}` matches any run of characters, line separators included
//!
//! Matching scans left to right without backtracking. Each literal is
//! searched for at or after the cursor (the first occurrence is taken), so
//! wildcards are lazy and literals are greedy. A literal that closes the
//! pattern after a wildcard is matched against the end of the text instead.
//!
//! A `{{}}` that opens or closes the whole pattern may also match zero
//! lines: `"{{}}\nlast"` matches `"last"` as well as `"first\nlast"`.
//!
//! # Example
//! ```
//! use tinta_harness::CurlyPattern;
//!
//! let pattern = CurlyPattern::compile("this is a {}");
//! assert!(pattern.matches("this is a test"));
//! assert!(!pattern.matches("this is a\ntest"));
//! ```

use std::borrow::Cow;
use std::fmt;

use tinta_text::is_line_separator_char;

/// Wildcard matching anything but a line separator.
pub const SINGLE_LINE_WILDCARD: &str = "{}";

/// Wildcard matching anything, line separators included.
pub const MULTI_LINE_WILDCARD: &str = "{{}}";

const LINE_FEED: char = '\n';

/// One compiled piece of a curly pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text that must appear verbatim.
    Literal(String),
    /// `{}`
    SingleLine,
    /// `{{}}`
    MultiLine,
}

impl Segment {
    /// Whether this segment is a wildcard.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }

    fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::SingleLine => f.write_str(SINGLE_LINE_WILDCARD),
            Self::MultiLine => f.write_str(MULTI_LINE_WILDCARD),
        }
    }
}

/// A compiled curly pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CurlyPattern {
    segments: Vec<Segment>,
}

impl CurlyPattern {
    /// Compile `pattern` into alternating literal and wildcard segments.
    ///
    /// `{{}}` is recognized before `{}`. Braces that form neither wildcard
    /// are literal text. Adjacent literals are merged and empty literals are
    /// never produced.
    #[must_use]
    pub fn compile(pattern: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern;

        while !rest.is_empty() {
            let (segment, len) = if rest.starts_with(MULTI_LINE_WILDCARD) {
                (Segment::MultiLine, MULTI_LINE_WILDCARD.len())
            } else if rest.starts_with(SINGLE_LINE_WILDCARD) {
                (Segment::SingleLine, SINGLE_LINE_WILDCARD.len())
            } else {
                let next = match rest.find('{') {
                    Some(0) => 1,
                    Some(brace) => brace,
                    None => rest.len(),
                };
                literal.push_str(&rest[..next]);
                rest = &rest[next..];
                continue;
            };
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(segment);
            rest = &rest[len..];
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Self { segments }
    }

    /// The compiled segments in pattern order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the pattern contains no wildcard.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        !self.segments.iter().any(Segment::is_wildcard)
    }

    /// Whether `text` matches this pattern as a whole.
    ///
    /// No preprocessing is applied; see
    /// [`MatchesCurlyPattern`](crate::MatchesCurlyPattern) for the usual
    /// normalizing entry point.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.mismatch(text).is_none()
    }

    /// Index of the segment at which matching `text` failed, or `None` on a
    /// match. A failure past the last segment (unconsumed text) reports
    /// `segments().len()`.
    #[must_use]
    pub fn mismatch(&self, text: &str) -> Option<usize> {
        let text = self.anchor(text);
        let text = text.as_ref();
        let last = self.segments.len().saturating_sub(1);

        let mut cursor = 0;
        let mut pending: Option<&Segment> = None;
        for (index, segment) in self.segments.iter().enumerate() {
            let Some(literal) = segment.as_literal() else {
                pending = Some(match (pending, segment) {
                    (Some(Segment::MultiLine), _) => &Segment::MultiLine,
                    _ => segment,
                });
                continue;
            };
            let rest = &text[cursor..];
            let found = match pending.take() {
                None => rest.starts_with(literal).then_some(0),
                Some(wildcard) => {
                    let at = if index == last {
                        rest.ends_with(literal).then(|| rest.len() - literal.len())
                    } else {
                        rest.find(literal)
                    };
                    at.filter(|&at| spans(wildcard, &rest[..at]))
                }
            };
            match found {
                Some(at) => cursor += at + literal.len(),
                None => return Some(index),
            }
        }

        let rest = &text[cursor..];
        let complete = match pending {
            Some(wildcard) => spans(wildcard, rest),
            None => rest.is_empty(),
        };
        (!complete).then_some(self.segments.len())
    }

    /// Give a leading or trailing `{{}}` a line to consume, so it may stand
    /// for zero lines.
    fn anchor<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let leading = matches!(
            self.segments.as_slice(),
            [Segment::MultiLine, Segment::Literal(next), ..] if next.starts_with(LINE_FEED)
        );
        let trailing = matches!(
            self.segments.as_slice(),
            [.., Segment::Literal(previous), Segment::MultiLine] if previous.ends_with(LINE_FEED)
        );
        if !leading && !trailing {
            return Cow::Borrowed(text);
        }
        let mut anchored = String::with_capacity(text.len() + 2);
        if leading {
            anchored.push(LINE_FEED);
        }
        anchored.push_str(text);
        if trailing {
            anchored.push(LINE_FEED);
        }
        Cow::Owned(anchored)
    }
}

fn spans(wildcard: &Segment, skipped: &str) -> bool {
    match wildcard {
        Segment::SingleLine => !skipped.chars().any(is_line_separator_char),
        _ => true,
    }
}

impl fmt::Display for CurlyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.segments.iter().try_for_each(|s| fmt::Display::fmt(s, f))
    }
}

impl From<&str> for CurlyPattern {
    fn from(pattern: &str) -> Self {
        Self::compile(pattern)
    }
}
