#![forbid(unsafe_code)]

//! Unicode scalar values.
//!
//! # Example
//! ```
//! use tinta_text::CodePoint;
//!
//! let cp = CodePoint::try_from("😀").unwrap();
//! assert_eq!(cp.unicode_notation(), "U+1F600");
//! assert_eq!(cp.name(), "GRINNING FACE");
//! assert_eq!(cp.columns(), 2);
//!
//! assert!(CodePoint::try_from("ab").is_err());
//! assert!(CodePoint::new(0x11_0000).is_err());
//! ```

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TextError};

/// Largest Unicode scalar value.
pub const MAX_CODE_POINT: u32 = 0x10_FFFF;

/// A single Unicode scalar value.
///
/// Surrogate code points (U+D800..U+DFFF) are not scalar values and are
/// rejected like out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodePoint(char);

impl CodePoint {
    /// Create a code point from its numeric value.
    ///
    /// # Errors
    /// Returns [`TextError::InvalidCodePoint`] if `value` exceeds
    /// [`MAX_CODE_POINT`] or is a surrogate.
    pub fn new(value: u32) -> Result<Self> {
        char::from_u32(value)
            .map(Self)
            .ok_or_else(|| TextError::InvalidCodePoint {
                input: format!("0x{value:X}"),
            })
    }

    /// Create a code point from a `char`; never fails.
    #[inline]
    #[must_use]
    pub const fn from_char(c: char) -> Self {
        Self(c)
    }

    /// The numeric value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0 as u32
    }

    #[inline]
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }

    /// Uppercase hexadecimal form with at least four digits, e.g. `"1F600"`.
    #[must_use]
    pub fn hex(self) -> String {
        format!("{:04X}", self.value())
    }

    /// The `U+` notation, e.g. `"U+0041"`.
    #[must_use]
    pub fn unicode_notation(self) -> String {
        format!("U+{}", self.hex())
    }

    /// The Unicode name, or a code point label where no name is known.
    #[must_use]
    pub fn name(self) -> Cow<'static, str> {
        crate::unicode_names::name_of(self.0)
    }

    /// Terminal columns of this code point on its own: -1 for non-printable
    /// controls, 0 for zero-width characters, 1 or 2 otherwise.
    #[inline]
    #[must_use]
    pub fn columns(self) -> i8 {
        crate::width::code_point_columns(self.0)
    }

    #[inline]
    #[must_use]
    pub fn is_whitespace(self) -> bool {
        self.0.is_whitespace()
    }

    /// Whether the code point occupies no column, such as combining marks,
    /// joiners and line separators.
    #[inline]
    #[must_use]
    pub fn is_zero_width(self) -> bool {
        self.columns() == 0
    }

    /// Whether the code point is a C0/C1 control character.
    #[inline]
    #[must_use]
    pub fn is_control(self) -> bool {
        self.0.is_control()
    }

    #[inline]
    #[must_use]
    pub fn is_ascii_letter(self) -> bool {
        self.0.is_ascii_alphabetic()
    }

    #[inline]
    #[must_use]
    pub fn is_ascii_digit(self) -> bool {
        self.0.is_ascii_digit()
    }

    #[inline]
    #[must_use]
    pub fn is_ascii_alphanumeric(self) -> bool {
        self.0.is_ascii_alphanumeric()
    }

    /// Whether the code point is one of LF, CR, NEL, LS or PS.
    #[inline]
    #[must_use]
    pub fn is_line_separator(self) -> bool {
        crate::lines::is_line_separator_char(self.0)
    }

    /// Whether the code point is the escape character that introduces ANSI
    /// escape sequences.
    #[inline]
    #[must_use]
    pub fn is_escape(self) -> bool {
        self.0 == tinta_style::ESC
    }
}

impl From<char> for CodePoint {
    fn from(c: char) -> Self {
        Self(c)
    }
}

impl From<CodePoint> for char {
    fn from(cp: CodePoint) -> Self {
        cp.0
    }
}

impl TryFrom<u32> for CodePoint {
    type Error = TextError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<i64> for CodePoint {
    type Error = TextError;

    fn try_from(value: i64) -> Result<Self> {
        u32::try_from(value)
            .map_err(|_| TextError::InvalidCodePoint {
                input: value.to_string(),
            })
            .and_then(Self::new)
    }
}

impl TryFrom<&str> for CodePoint {
    type Error = TextError;

    /// Decode `text`, which must consist of exactly one code point.
    fn try_from(text: &str) -> Result<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Self(c)),
            _ => Err(TextError::InvalidCodePoint {
                input: format!("{text:?}"),
            }),
        }
    }
}

impl FromStr for CodePoint {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_from(s)
    }
}

impl fmt::Display for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Iterate over the code points of `text`.
pub fn code_points(text: &str) -> impl Iterator<Item = CodePoint> + '_ {
    text.chars().map(CodePoint)
}

/// Number of code points in `text`.
#[inline]
#[must_use]
pub fn code_point_count(text: &str) -> usize {
    text.chars().count()
}
