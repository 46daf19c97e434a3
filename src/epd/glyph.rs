//! Glyph rasterizer

use crate::epd::buffer::FrameBuffer;
use crate::epd::color::Color;
use crate::epd::error::GraphicsError;
use crate::epd::font::{cell_glyph, FontSize, GlyphSource};

impl FrameBuffer<'_> {
    /// Draw `chr` with its top left corner at `(x, y)`
    ///
    /// Set glyph bits are painted `color`, clear bits the inverse, so the whole
    /// cell is repainted and glyphs are never transparent. The size, the glyph
    /// and the cell bounds are all checked before the first pixel is touched:
    /// on error the buffer is unchanged.
    pub fn draw_char<G, S>(
        &mut self,
        fonts: &G,
        x: u16,
        y: u16,
        chr: char,
        size: S,
        color: Color,
    ) -> Result<(), GraphicsError>
    where
        G: GlyphSource + ?Sized,
        S: TryInto<FontSize>,
        GraphicsError: From<S::Error>,
    {
        let size = size.try_into()?;
        let glyph = cell_glyph(fonts, size, chr)?;
        self.check_area(x, y, size.columns(), size.cell_height())?;
        self.rasterize(glyph, x, y, size, color)
    }

    /// Walk the glyph bytes, each one a column of eight pixels, LSB on top
    pub(crate) fn rasterize(
        &mut self,
        glyph: &[u8],
        x: u16,
        y: u16,
        size: FontSize,
        color: Color,
    ) -> Result<(), GraphicsError> {
        let x0 = x;
        let mut y0 = y;
        let mut cx = x;
        let mut cy = y;

        for &byte in glyph {
            let mut bits = byte;
            for _ in 0..8 {
                let pixel = if bits & 0x01 != 0 {
                    color
                } else {
                    color.inverse()
                };
                self.set_pixel(cx, cy, pixel)?;
                bits >>= 1;
                cy += 1;
            }

            cx += 1;
            // 8pt glyphs are a single band
            if size != FontSize::Size8 && cx - x0 == size.columns() {
                cx = x0;
                y0 += 8;
            }
            cy = y0;
        }
        Ok(())
    }
}
