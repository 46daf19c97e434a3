//! Monochrome e-paper framebuffer and bitmap font rendering
//!
//! The [`epd`] module holds the drawing side: a bit-packed [`epd::FrameBuffer`]
//! borrowed from the caller, rotation-aware pixel addressing, and a glyph
//! rasterizer for fixed-width column fonts. The [`ssd1680`] module is one
//! implementation of the [`epd::PanelTransport`] seam that pushes the finished
//! buffer to a panel over SPI.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod epd;
pub mod ssd1680;

pub use crate::epd::{
    buffer_len, text_width, Color, FontSet, FontSize, FontTable, FrameBuffer, GlyphSource,
    GraphicsError, OwnedFontTable, PanelTransport, Rotation, BLACK, WHITE,
};
pub use crate::ssd1680::driver::Ssd1680;
