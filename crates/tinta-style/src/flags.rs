#![forbid(unsafe_code)]

//! Text attribute flags and their SGR on/off codes.

bitflags::bitflags! {
    /// Text attributes tracked by an SGR state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StyleFlags: u16 {
        /// Bold / increased intensity.
        const BOLD             = 0b0000_0000_0001;
        /// Dim / decreased intensity.
        const DIM              = 0b0000_0000_0010;
        /// Italic text.
        const ITALIC           = 0b0000_0000_0100;
        /// Underlined text.
        const UNDERLINE        = 0b0000_0000_1000;
        /// Blinking text.
        const BLINK            = 0b0000_0001_0000;
        /// Reverse video (swap fg/bg).
        const REVERSE          = 0b0000_0010_0000;
        /// Hidden / invisible text.
        const HIDDEN           = 0b0000_0100_0000;
        /// Strikethrough text.
        const STRIKETHROUGH    = 0b0000_1000_0000;
        /// Doubly underlined text.
        const DOUBLE_UNDERLINE = 0b0001_0000_0000;
        /// Overlined text.
        const OVERLINE         = 0b0010_0000_0000;
    }
}

impl Default for StyleFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// SGR attribute codes for style flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SgrCodes {
    /// Enable code
    pub on: u16,
    /// Disable code
    pub off: u16,
}

/// SGR codes for bold (on=1, off=22).
pub const SGR_BOLD: SgrCodes = SgrCodes { on: 1, off: 22 };
/// SGR codes for dim (on=2, off=22).
pub const SGR_DIM: SgrCodes = SgrCodes { on: 2, off: 22 };
/// SGR codes for italic (on=3, off=23).
pub const SGR_ITALIC: SgrCodes = SgrCodes { on: 3, off: 23 };
/// SGR codes for underline (on=4, off=24).
pub const SGR_UNDERLINE: SgrCodes = SgrCodes { on: 4, off: 24 };
/// SGR codes for blink (on=5, off=25).
pub const SGR_BLINK: SgrCodes = SgrCodes { on: 5, off: 25 };
/// SGR codes for reverse video (on=7, off=27).
pub const SGR_REVERSE: SgrCodes = SgrCodes { on: 7, off: 27 };
/// SGR codes for hidden text (on=8, off=28).
pub const SGR_HIDDEN: SgrCodes = SgrCodes { on: 8, off: 28 };
/// SGR codes for strikethrough (on=9, off=29).
pub const SGR_STRIKETHROUGH: SgrCodes = SgrCodes { on: 9, off: 29 };
/// SGR codes for double underline (on=21, off=24).
pub const SGR_DOUBLE_UNDERLINE: SgrCodes = SgrCodes { on: 21, off: 24 };
/// SGR codes for overline (on=53, off=55).
pub const SGR_OVERLINE: SgrCodes = SgrCodes { on: 53, off: 55 };

/// Ordered table of (flag, on/off codes) for iteration.
///
/// Ordered by ascending "on" code so generated sequences are stable.
pub const FLAG_TABLE: [(StyleFlags, SgrCodes); 10] = [
    (StyleFlags::BOLD, SGR_BOLD),
    (StyleFlags::DIM, SGR_DIM),
    (StyleFlags::ITALIC, SGR_ITALIC),
    (StyleFlags::UNDERLINE, SGR_UNDERLINE),
    (StyleFlags::BLINK, SGR_BLINK),
    (StyleFlags::REVERSE, SGR_REVERSE),
    (StyleFlags::HIDDEN, SGR_HIDDEN),
    (StyleFlags::STRIKETHROUGH, SGR_STRIKETHROUGH),
    (StyleFlags::DOUBLE_UNDERLINE, SGR_DOUBLE_UNDERLINE),
    (StyleFlags::OVERLINE, SGR_OVERLINE),
];

/// Get SGR codes for a single style flag.
///
/// Returns `None` for the empty set or for combinations of flags.
#[must_use]
pub fn sgr_codes_for_flag(flag: StyleFlags) -> Option<SgrCodes> {
    FLAG_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == flag)
        .map(|(_, codes)| *codes)
}

/// Flags switched off by a single SGR "off" code.
///
/// Some off codes are shared: 22 clears bold and dim, 24 clears both
/// underline variants.
#[must_use]
pub fn flags_cleared_by(code: u16) -> StyleFlags {
    FLAG_TABLE
        .iter()
        .filter(|(_, codes)| codes.off == code)
        .fold(StyleFlags::empty(), |acc, (flag, _)| acc | *flag)
}
