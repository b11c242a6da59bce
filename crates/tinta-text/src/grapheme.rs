#![forbid(unsafe_code)]

//! Grapheme clusters: user-perceived characters.
//!
//! Segmentation follows the extended grapheme cluster rules of UAX #29 as
//! implemented by `unicode-segmentation`. Combining marks, joiners and
//! variation selectors attach to the preceding base; control characters
//! always form clusters of their own (CR LF being the one two-code-point
//! control cluster).
//!
//! # Example
//! ```
//! use tinta_text::{grapheme_cluster_count, grapheme_clusters};
//!
//! let clusters: Vec<String> = grapheme_clusters("a\u{0333}o").map(|c| c.to_string()).collect();
//! assert_eq!(clusters, vec!["a\u{0333}", "o"]);
//! assert_eq!(grapheme_cluster_count("👨‍👩‍👧!"), 2);
//! ```

use std::fmt;

use smallvec::SmallVec;
use unicode_segmentation::{Graphemes, UnicodeSegmentation};

use crate::code_point::CodePoint;
use crate::error::{Result, TextError};

/// A non-empty sequence of code points forming one user-perceived character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphemeCluster {
    code_points: SmallVec<[CodePoint; 4]>,
}

impl GraphemeCluster {
    /// Create a cluster from its code points.
    ///
    /// The code points are taken as given; no segmentation is applied.
    ///
    /// # Errors
    /// Returns [`TextError::InvalidArgument`] if `code_points` is empty.
    pub fn new(code_points: impl IntoIterator<Item = CodePoint>) -> Result<Self> {
        let code_points: SmallVec<[CodePoint; 4]> = code_points.into_iter().collect();
        if code_points.is_empty() {
            return Err(TextError::invalid_argument(
                "code_points",
                "a grapheme cluster needs at least one code point",
            ));
        }
        Ok(Self { code_points })
    }

    /// Build a cluster from a segment produced by the boundary scanner.
    fn from_segment(segment: &str) -> Self {
        Self {
            code_points: segment.chars().map(CodePoint::from).collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn code_points(&self) -> &[CodePoint] {
        &self.code_points
    }

    #[inline]
    #[must_use]
    pub fn code_point_count(&self) -> usize {
        self.code_points.len()
    }

    /// Terminal columns occupied by this cluster (0, 1 or 2).
    #[must_use]
    pub fn columns(&self) -> usize {
        crate::width::grapheme_columns(&self.to_string())
    }

    /// Whether every code point of the cluster is whitespace.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.code_points.iter().all(|cp| cp.is_whitespace())
    }
}

impl TryFrom<&str> for GraphemeCluster {
    type Error = TextError;

    /// Decode `text`, which must consist of exactly one grapheme cluster.
    fn try_from(text: &str) -> Result<Self> {
        let mut segments = text.graphemes(true);
        match (segments.next(), segments.next()) {
            (Some(segment), None) => Ok(Self::from_segment(segment)),
            _ => Err(TextError::invalid_argument(
                "text",
                format!("{text:?} is not exactly one grapheme cluster"),
            )),
        }
    }
}

impl fmt::Display for GraphemeCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cp in &self.code_points {
            write!(f, "{cp}")?;
        }
        Ok(())
    }
}

/// Lazy sequence of the grapheme clusters of a string.
///
/// Cloning the iterator restarts nothing and shares nothing: each clone
/// continues independently from the position it was cloned at, and calling
/// [`grapheme_clusters`] again starts over.
#[derive(Clone)]
pub struct GraphemeClusters<'a> {
    inner: Graphemes<'a>,
}

impl fmt::Debug for GraphemeClusters<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphemeClusters").finish_non_exhaustive()
    }
}

impl Iterator for GraphemeClusters<'_> {
    type Item = GraphemeCluster;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(GraphemeCluster::from_segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for GraphemeClusters<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(GraphemeCluster::from_segment)
    }
}

/// Split `text` into grapheme clusters.
#[must_use]
pub fn grapheme_clusters(text: &str) -> GraphemeClusters<'_> {
    GraphemeClusters {
        inner: text.graphemes(true),
    }
}

/// Number of grapheme clusters in `text`.
#[must_use]
pub fn grapheme_cluster_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Replace every grapheme cluster of `text` by `transform(cluster)`.
pub fn map_grapheme_clusters<F, S>(text: &str, mut transform: F) -> String
where
    F: FnMut(&GraphemeCluster) -> S,
    S: AsRef<str>,
{
    let mut out = String::with_capacity(text.len());
    for cluster in grapheme_clusters(text) {
        out.push_str(transform(&cluster).as_ref());
    }
    out
}
