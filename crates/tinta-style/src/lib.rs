#![forbid(unsafe_code)]

//! SGR style state for ANSI-aware text.
//!
//! This crate models the subset of ANSI escape sequences that changes how
//! text looks (Select Graphic Rendition):
//! - [`StyleFlags`] - text attributes with their on/off codes
//! - [`Color`] - 16-color, 256-color and true color values
//! - [`Style`] - the active SGR state, folded from parameter lists
//! - [`parse_sgr_params`] / [`sgr_sequence`] - parameter parsing and encoding
//!
//! # Example
//! ```
//! use tinta_style::{Color, Style};
//!
//! let mut style = Style::new();
//! style.apply(&[1, 31]);
//! assert_eq!(style, Style::new().bold().fg(Color::RED));
//! assert_eq!(style.close_sequence(), "\x1b[22;39m");
//! ```

pub mod color;
pub mod flags;
pub mod sgr;
pub mod style;

pub use color::{Color, ColorLayer, Rgb};
pub use flags::{FLAG_TABLE, SgrCodes, StyleFlags, flags_cleared_by, sgr_codes_for_flag};
pub use sgr::{
    CSI, ESC, SGR_FINAL, SGR_RESET, SgrParams, SgrParseError, parse_sgr_params, sgr_sequence,
    write_sgr,
};
pub use style::Style;
