#![forbid(unsafe_code)]

//! Color types addressable through SGR parameters.

use smallvec::SmallVec;

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The color slot an SGR color parameter addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorLayer {
    /// Text color (30–37, 38, 90–97).
    Foreground,
    /// Cell color (40–47, 48, 100–107).
    Background,
    /// Underline color (58). Only the extended forms exist.
    Underline,
}

impl ColorLayer {
    /// Parameter that introduces an extended (`;5;n` / `;2;r;g;b`) color.
    #[must_use]
    pub const fn extended_code(self) -> u16 {
        match self {
            Self::Foreground => 38,
            Self::Background => 48,
            Self::Underline => 58,
        }
    }

    /// Parameter that restores the default color of this layer.
    #[must_use]
    pub const fn default_code(self) -> u16 {
        match self {
            Self::Foreground => 39,
            Self::Background => 49,
            Self::Underline => 59,
        }
    }
}

/// A terminal color as expressed by SGR parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// One of the 16 standard colors (0–7 normal, 8–15 bright).
    Ansi16(u8),
    /// An entry of the 256-color palette.
    Indexed(u8),
    /// A 24-bit color.
    Rgb(Rgb),
}

impl Color {
    pub const BLACK: Self = Self::Ansi16(0);
    pub const RED: Self = Self::Ansi16(1);
    pub const GREEN: Self = Self::Ansi16(2);
    pub const YELLOW: Self = Self::Ansi16(3);
    pub const BLUE: Self = Self::Ansi16(4);
    pub const MAGENTA: Self = Self::Ansi16(5);
    pub const CYAN: Self = Self::Ansi16(6);
    pub const WHITE: Self = Self::Ansi16(7);
    pub const BRIGHT_BLACK: Self = Self::Ansi16(8);
    pub const BRIGHT_RED: Self = Self::Ansi16(9);
    pub const BRIGHT_GREEN: Self = Self::Ansi16(10);
    pub const BRIGHT_YELLOW: Self = Self::Ansi16(11);
    pub const BRIGHT_BLUE: Self = Self::Ansi16(12);
    pub const BRIGHT_MAGENTA: Self = Self::Ansi16(13);
    pub const BRIGHT_CYAN: Self = Self::Ansi16(14);
    pub const BRIGHT_WHITE: Self = Self::Ansi16(15);

    /// Create a 24-bit color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    /// Append the SGR parameters selecting this color on `layer`.
    ///
    /// Uses codes 30-37/90-97 (40-47/100-107) for the 16 standard colors
    /// where the layer has them; everything else goes through the extended
    /// `38;5;n` / `38;2;r;g;b` forms.
    pub fn push_params(self, layer: ColorLayer, out: &mut SmallVec<[u16; 8]>) {
        match (self, layer) {
            (Self::Ansi16(index), ColorLayer::Foreground) => {
                out.push(ansi16_code(index, 30, 90));
            }
            (Self::Ansi16(index), ColorLayer::Background) => {
                out.push(ansi16_code(index, 40, 100));
            }
            (Self::Ansi16(index) | Self::Indexed(index), _) => {
                out.extend([layer.extended_code(), 5, u16::from(index)]);
            }
            (Self::Rgb(rgb), _) => {
                out.extend([
                    layer.extended_code(),
                    2,
                    u16::from(rgb.r),
                    u16::from(rgb.g),
                    u16::from(rgb.b),
                ]);
            }
        }
    }
}

fn ansi16_code(index: u8, normal_base: u16, bright_base: u16) -> u16 {
    let index = u16::from(index & 0x0f);
    if index < 8 {
        normal_base + index
    } else {
        bright_base + index - 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(color: Color, layer: ColorLayer) -> Vec<u16> {
        let mut out = SmallVec::new();
        color.push_params(layer, &mut out);
        out.to_vec()
    }

    #[test]
    fn ansi16_foreground_codes() {
        assert_eq!(params(Color::RED, ColorLayer::Foreground), vec![31]);
        assert_eq!(params(Color::WHITE, ColorLayer::Foreground), vec![37]);
        assert_eq!(params(Color::BRIGHT_RED, ColorLayer::Foreground), vec![91]);
    }

    #[test]
    fn ansi16_background_codes() {
        assert_eq!(params(Color::BLACK, ColorLayer::Background), vec![40]);
        assert_eq!(
            params(Color::BRIGHT_WHITE, ColorLayer::Background),
            vec![107]
        );
    }

    #[test]
    fn ansi16_underline_uses_palette_form() {
        assert_eq!(params(Color::RED, ColorLayer::Underline), vec![58, 5, 1]);
    }

    #[test]
    fn indexed_and_rgb_use_extended_forms() {
        assert_eq!(
            params(Color::Indexed(196), ColorLayer::Foreground),
            vec![38, 5, 196]
        );
        assert_eq!(
            params(Color::rgb(255, 128, 0), ColorLayer::Background),
            vec![48, 2, 255, 128, 0]
        );
    }

    #[test]
    fn layer_codes() {
        assert_eq!(ColorLayer::Foreground.default_code(), 39);
        assert_eq!(ColorLayer::Background.default_code(), 49);
        assert_eq!(ColorLayer::Underline.default_code(), 59);
        assert_eq!(ColorLayer::Underline.extended_code(), 58);
    }
}
