#![forbid(unsafe_code)]

//! The active SGR state and the sequences that open and close it.
//!
//! Reading a stream of SGR sequences left to right folds them into a
//! [`Style`]. Any cut through such a stream can then be made self-contained:
//! [`Style::close_sequence`] ends the style at the cut and
//! [`Style::open_sequence`] re-establishes it where the text continues.
//!
//! # Example
//! ```
//! use tinta_style::{Color, Style};
//!
//! let mut style = Style::new();
//! style.apply(&[3, 36]);
//! style.apply(&[4]);
//! assert_eq!(style.open_sequence(), "\x1b[3;4;36m");
//! assert_eq!(style.close_sequence(), "\x1b[23;24;39m");
//!
//! let red = Style::new().fg(Color::RED);
//! assert_eq!(red.paint("red"), "\x1b[31mred\x1b[39m");
//! ```

use std::str::FromStr;

use crate::color::{Color, ColorLayer};
use crate::flags::{FLAG_TABLE, StyleFlags, flags_cleared_by};
use crate::sgr::{SgrParams, SgrParseError, parse_sgr_params, write_sgr};

/// A combination of SGR attributes and colors.
///
/// The default style is the terminal's initial state: no attributes and the
/// default colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Active attributes.
    pub flags: StyleFlags,
    /// Foreground color, `None` for the terminal default.
    pub fg: Option<Color>,
    /// Background color, `None` for the terminal default.
    pub bg: Option<Color>,
    /// Underline color, `None` for the terminal default.
    pub underline_color: Option<Color>,
}

impl Style {
    /// Create the default style.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            flags: StyleFlags::empty(),
            fg: None,
            bg: None,
            underline_color: None,
        }
    }

    /// Whether this is the terminal's initial state.
    #[inline]
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.flags.is_empty()
            && self.fg.is_none()
            && self.bg.is_none()
            && self.underline_color.is_none()
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Set the underline color.
    #[must_use]
    pub const fn underline_color(mut self, color: Color) -> Self {
        self.underline_color = Some(color);
        self
    }

    /// Add attribute flags.
    #[must_use]
    pub fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        self.with_flags(StyleFlags::BOLD)
    }

    #[must_use]
    pub fn dim(self) -> Self {
        self.with_flags(StyleFlags::DIM)
    }

    #[must_use]
    pub fn italic(self) -> Self {
        self.with_flags(StyleFlags::ITALIC)
    }

    #[must_use]
    pub fn underline(self) -> Self {
        self.with_flags(StyleFlags::UNDERLINE)
    }

    #[must_use]
    pub fn blink(self) -> Self {
        self.with_flags(StyleFlags::BLINK)
    }

    #[must_use]
    pub fn reverse(self) -> Self {
        self.with_flags(StyleFlags::REVERSE)
    }

    #[must_use]
    pub fn hidden(self) -> Self {
        self.with_flags(StyleFlags::HIDDEN)
    }

    #[must_use]
    pub fn strikethrough(self) -> Self {
        self.with_flags(StyleFlags::STRIKETHROUGH)
    }

    #[must_use]
    pub fn overline(self) -> Self {
        self.with_flags(StyleFlags::OVERLINE)
    }

    /// Fold one SGR parameter list into this state.
    ///
    /// An empty list changes nothing; the reset written as `ESC [ m` reaches
    /// here as `[0]` through [`parse_sgr_params`]. Unknown codes are ignored,
    /// as terminals do, and so are extended colors whose parameters are
    /// missing or out of range.
    pub fn apply(&mut self, params: &[u16]) {
        let mut iter = params.iter().copied();
        while let Some(code) = iter.next() {
            match code {
                0 => *self = Self::new(),
                1 => self.flags |= StyleFlags::BOLD,
                2 => self.flags |= StyleFlags::DIM,
                3 => self.flags |= StyleFlags::ITALIC,
                4 => self.flags |= StyleFlags::UNDERLINE,
                5 | 6 => self.flags |= StyleFlags::BLINK,
                7 => self.flags |= StyleFlags::REVERSE,
                8 => self.flags |= StyleFlags::HIDDEN,
                9 => self.flags |= StyleFlags::STRIKETHROUGH,
                21 => self.flags |= StyleFlags::DOUBLE_UNDERLINE,
                53 => self.flags |= StyleFlags::OVERLINE,
                22..=29 | 55 => self.flags.remove(flags_cleared_by(code)),
                30..=37 => self.fg = Some(Color::Ansi16(ansi16_index(code, 30))),
                90..=97 => self.fg = Some(Color::Ansi16(ansi16_index(code, 90) + 8)),
                40..=47 => self.bg = Some(Color::Ansi16(ansi16_index(code, 40))),
                100..=107 => self.bg = Some(Color::Ansi16(ansi16_index(code, 100) + 8)),
                38 => {
                    if let Some(color) = take_extended_color(&mut iter) {
                        self.fg = Some(color);
                    }
                }
                48 => {
                    if let Some(color) = take_extended_color(&mut iter) {
                        self.bg = Some(color);
                    }
                }
                58 => {
                    if let Some(color) = take_extended_color(&mut iter) {
                        self.underline_color = Some(color);
                    }
                }
                39 => self.fg = None,
                49 => self.bg = None,
                59 => self.underline_color = None,
                _ => {}
            }
        }
    }

    /// Parameters that establish this state from the default style.
    #[must_use]
    pub fn open_params(&self) -> SgrParams {
        let mut params = SgrParams::new();
        for (flag, codes) in FLAG_TABLE {
            if self.flags.contains(flag) {
                params.push(codes.on);
            }
        }
        if let Some(color) = self.fg {
            color.push_params(ColorLayer::Foreground, &mut params);
        }
        if let Some(color) = self.bg {
            color.push_params(ColorLayer::Background, &mut params);
        }
        if let Some(color) = self.underline_color {
            color.push_params(ColorLayer::Underline, &mut params);
        }
        params
    }

    /// Parameters that return this state to the default style.
    ///
    /// Partial resets only: each active attribute and color is switched off
    /// by its own code, in ascending order and without duplicates.
    #[must_use]
    pub fn close_params(&self) -> SgrParams {
        let mut params = SgrParams::new();
        for (flag, codes) in FLAG_TABLE {
            if self.flags.contains(flag) {
                params.push(codes.off);
            }
        }
        if self.fg.is_some() {
            params.push(ColorLayer::Foreground.default_code());
        }
        if self.bg.is_some() {
            params.push(ColorLayer::Background.default_code());
        }
        if self.underline_color.is_some() {
            params.push(ColorLayer::Underline.default_code());
        }
        params.sort_unstable();
        params.dedup();
        params
    }

    /// The SGR sequence establishing this state, empty for the default style.
    #[must_use]
    pub fn open_sequence(&self) -> String {
        let mut out = String::new();
        write_sgr(&mut out, &self.open_params());
        out
    }

    /// The SGR sequence ending this state, empty for the default style.
    #[must_use]
    pub fn close_sequence(&self) -> String {
        let mut out = String::new();
        write_sgr(&mut out, &self.close_params());
        out
    }

    /// Wrap `text` in the open and close sequences of this style.
    #[must_use]
    pub fn paint(&self, text: &str) -> String {
        if self.is_default() || text.is_empty() {
            return text.to_string();
        }
        let mut out = self.open_sequence();
        out.push_str(text);
        out.push_str(&self.close_sequence());
        out
    }
}

impl FromStr for Style {
    type Err = SgrParseError;

    /// Parse an SGR parameter list such as `"1;31"` and apply it to the
    /// default style.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut style = Self::new();
        style.apply(&parse_sgr_params(s)?);
        Ok(style)
    }
}

fn ansi16_index(code: u16, base: u16) -> u8 {
    // Callers only pass codes within base..base + 8.
    u8::try_from(code - base).unwrap_or(0)
}

fn take_extended_color(iter: &mut impl Iterator<Item = u16>) -> Option<Color> {
    match iter.next()? {
        5 => u8::try_from(iter.next()?).ok().map(Color::Indexed),
        2 => {
            let r = u8::try_from(iter.next()?).ok();
            let g = u8::try_from(iter.next()?).ok();
            let b = u8::try_from(iter.next()?).ok();
            Some(Color::rgb(r?, g?, b?))
        }
        _ => None,
    }
}
