//! E-paper framebuffer
//!
//! A 1-bit-per-pixel image of the panel, kept in a byte region the caller
//! allocates and owns. Drawing goes through logical coordinates which are
//! rotated onto the physical memory layout the panel controller expects.
//!
//! ### Usage
//! 1. allocate `buffer_len(WIDTH, HEIGHT)` bytes and hand them to
//!    [`FrameBuffer::configure`] together with the panel rotation
//! 1. clear it with [`WHITE`] (or [`BLACK`])
//! 1. draw with [`FrameBuffer::set_pixel`], [`FrameBuffer::draw_char`],
//!    [`FrameBuffer::draw_string`] or any
//!    [`embedded_graphics`](https://github.com/embedded-graphics/embedded-graphics) primitive
//! 1. send it with [`PanelTransport::display_frame`]
//!
//! ### Memory layout
//!
//! MSB first, one bit per pixel, rows padded to whole bytes, row major over
//! the physical (unrotated) geometry. A set bit is white, a cleared bit is
//! black.

pub mod buffer;
pub mod color;
pub mod error;
pub mod font;
pub mod glyph;
pub mod graphics;
pub mod rotation;
pub mod text;
pub mod transport;

pub use buffer::FrameBuffer;
pub use color::{Color, BLACK, WHITE};
pub use error::{AddressingError, ConfigError, GlyphLookupError, GraphicsError};
pub use font::{FontSet, FontSize, FontTable, GlyphSource, OwnedFontTable};
pub use rotation::Rotation;
pub use text::text_width;
pub use transport::PanelTransport;

/// Panel width in pixels, as wired to the controller
pub const WIDTH: u16 = 122;

/// Panel height in pixels, as wired to the controller
pub const HEIGHT: u16 = 250;

/// Number of bytes a buffer needs for a `width` x `height` panel
///
/// Rows are padded to whole bytes.
pub const fn buffer_len(width: u16, height: u16) -> usize {
    (width as usize).div_ceil(8) * height as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_len_pads_rows_to_whole_bytes() {
        assert_eq!(buffer_len(WIDTH, HEIGHT), 16 * 250);
        assert_eq!(buffer_len(128, 296), 16 * 296);
        assert_eq!(buffer_len(1, 1), 1);
        assert_eq!(buffer_len(9, 2), 4);
    }
}
