#![forbid(unsafe_code)]

//! ANSI-aware, Unicode-correct text.
//!
//! This crate measures, slices and reflows text the way a terminal shows it:
//! - [`CodePoint`] / [`GraphemeCluster`] - scalar values and user-perceived
//!   characters
//! - [`columns`] and friends - terminal column widths (0, 1 or 2 per cluster)
//!   with cluster-preserving slicing, padding, truncation and chunking
//! - [`tokenize`] / [`Token`] - escape-sequence and text tokens
//! - [`TokenCache`] - shared read-through cache of token sequences
//! - [`AnsiString`] - styled text indexed by visible characters, whose pieces
//!   stay correctly styled when cut
//! - [`lines`], [`wrap_lines`], [`add_column`] - line-oriented layout
//!
//! # Example
//! ```
//! use tinta_text::{AnsiString, columns, wrap_lines};
//!
//! assert_eq!(columns("a\u{0333}o"), 2);
//! assert_eq!(wrap_lines("12345😀7890\n", 3).unwrap(), "123\n45 \n😀7\n890\n");
//!
//! let styled = AnsiString::from("\x1b[1mbold\x1b[22m text");
//! assert_eq!(styled.length(), 9);
//! assert_eq!(styled.sub_sequence(1, 3).unwrap().to_string(), "\x1b[1mol\x1b[22m");
//! ```

pub mod ansi_string;
pub mod code_point;
pub mod error;
pub mod grapheme;
pub mod lines;
pub mod search;
pub mod token;
pub mod token_cache;
mod unicode_names;
pub mod width;

pub use ansi_string::AnsiString;
pub use code_point::{CodePoint, MAX_CODE_POINT, code_point_count, code_points};
pub use error::{Result, TextError};
pub use grapheme::{
    GraphemeCluster, GraphemeClusters, grapheme_cluster_count, grapheme_clusters,
    map_grapheme_clusters,
};
pub use lines::{
    ColumnOptions, LineSeparator, Lines, add_column, detect_line_separator,
    ends_with_line_separator, flat_map_lines, is_line_separator_char, line_sequence, lines,
    map_lines, remove_trailing_line_separator, unify_line_separators, wrap_lines,
};
pub use search::contains_with;
pub use token::{EscapeKind, HYPERLINK_CLOSE, Token, contains_ansi, strip_ansi, tokenize};
pub use token_cache::{CacheStats, TokenCache};
pub use width::{
    DEFAULT_PADDING, DEFAULT_TRUNCATION_MARKER, chunked_by_columns, code_point_columns, columns,
    find_index_by_columns, grapheme_columns, pad_end_by_columns, pad_end_by_columns_with,
    pad_start_by_columns, pad_start_by_columns_with, sub_sequence_by_columns,
    substring_by_columns, truncate_by_columns, truncate_by_columns_with, truncate_end_by_columns,
    truncate_end_by_columns_with, truncate_start_by_columns, truncate_start_by_columns_with,
};
