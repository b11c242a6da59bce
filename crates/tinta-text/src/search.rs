#![forbid(unsafe_code)]

//! Substring search that can look through escape sequences and case.
//!
//! # Example
//! ```
//! use tinta_text::contains_with;
//!
//! let styled = "\x1b[1mHello\x1b[22m World";
//! assert!(!contains_with(styled, "hello world", false, false));
//! assert!(contains_with(styled, "hello world", true, true));
//! ```

use std::borrow::Cow;

use crate::token::strip_ansi;

/// Whether `haystack` contains `needle`.
///
/// With `ignore_ansi`, escape sequences are removed from both sides before
/// searching. With `ignore_case`, both sides are lowercased. An empty needle
/// is always found.
#[must_use]
pub fn contains_with(haystack: &str, needle: &str, ignore_case: bool, ignore_ansi: bool) -> bool {
    let (haystack, needle) = if ignore_ansi {
        (strip_ansi(haystack), strip_ansi(needle))
    } else {
        (Cow::Borrowed(haystack), Cow::Borrowed(needle))
    };
    if ignore_case {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    } else {
        haystack.contains(needle.as_ref())
    }
}
