//! Pixel polarity for the black/white panel

use embedded_graphics::pixelcolor::BinaryColor;

/// Byte value that paints eight white pixels
pub const WHITE: u8 = 0xFF;

/// Byte value that paints eight black pixels
pub const BLACK: u8 = 0x00;

/// Color of a single pixel
///
/// The panel stores white as a set bit and black as a cleared bit, so
/// [`Color::Black`] is the foreground that drawing operations clear bits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Foreground, bit cleared
    Black,
    /// Background, bit set
    #[default]
    White,
}

impl Color {
    /// Byte value with all eight pixels in this color
    pub const fn byte_value(self) -> u8 {
        match self {
            Color::Black => BLACK,
            Color::White => WHITE,
        }
    }

    /// The opposite polarity
    pub const fn inverse(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Color encoded by a single bit of the buffer
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Color::White
        } else {
            Color::Black
        }
    }
}

/// `true` is the foreground (black)
impl From<bool> for Color {
    fn from(on: bool) -> Self {
        if on {
            Color::Black
        } else {
            Color::White
        }
    }
}

/// `BinaryColor::On` draws black, the way embedded-graphics text is drawn on paper
impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Self {
        match color {
            BinaryColor::On => Color::Black,
            BinaryColor::Off => Color::White,
        }
    }
}

impl From<Color> for BinaryColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => BinaryColor::On,
            Color::White => BinaryColor::Off,
        }
    }
}
