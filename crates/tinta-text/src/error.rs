#![forbid(unsafe_code)]

//! Errors raised by text operations.
//!
//! All of these are raised synchronously at the invalid call and never
//! recovered internally. Malformed ANSI input is not an error; pattern
//! mismatches are not errors either.

/// Error raised by an invalid text operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// Input does not denote exactly one Unicode scalar value.
    InvalidCodePoint { input: String },
    /// An argument is outside the domain of the operation.
    InvalidArgument { name: &'static str, reason: String },
    /// A character index lies beyond the subject's length.
    IndexOutOfBounds { index: usize, length: usize },
}

impl TextError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for TextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCodePoint { input } => {
                write!(f, "{input} does not denote exactly one code point")
            }
            Self::InvalidArgument { name, reason } => {
                write!(f, "invalid argument '{name}': {reason}")
            }
            Self::IndexOutOfBounds { index, length } => {
                write!(f, "index {index} out of bounds for length {length}")
            }
        }
    }
}

impl std::error::Error for TextError {}

/// Result alias for text operations.
pub type Result<T> = std::result::Result<T, TextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            TextError::InvalidCodePoint {
                input: "\"ab\"".into()
            }
            .to_string(),
            "\"ab\" does not denote exactly one code point"
        );
        assert_eq!(
            TextError::invalid_argument("columns", "must be positive").to_string(),
            "invalid argument 'columns': must be positive"
        );
        assert_eq!(
            TextError::IndexOutOfBounds {
                index: 4,
                length: 3
            }
            .to_string(),
            "index 4 out of bounds for length 3"
        );
    }
}
