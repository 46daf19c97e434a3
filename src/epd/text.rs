//! Single line text layout

use crate::epd::buffer::FrameBuffer;
use crate::epd::color::Color;
use crate::epd::error::{AddressingError, GraphicsError};
use crate::epd::font::{cell_glyph, FontSize, GlyphSource};

/// Width in pixels the cursor moves over while drawing `text`
pub fn text_width(text: &str, size: FontSize) -> u32 {
    text.chars().count() as u32 * u32::from(size.advance())
}

impl FrameBuffer<'_> {
    /// Draw `text` left to right from `(x, y)`, advancing `size / 2` per character
    ///
    /// There is no wrapping and no clipping. Every glyph is looked up before
    /// anything is drawn, so an unknown character leaves the buffer unchanged.
    /// A character whose cell runs off the drawing area fails with an
    /// addressing error; the characters before it stay drawn.
    pub fn draw_string<G, S>(
        &mut self,
        fonts: &G,
        x: u16,
        y: u16,
        text: &str,
        size: S,
        color: Color,
    ) -> Result<(), GraphicsError>
    where
        G: GlyphSource + ?Sized,
        S: TryInto<FontSize>,
        GraphicsError: From<S::Error>,
    {
        let size = size.try_into()?;
        let glyphs = text
            .chars()
            .map(|chr| cell_glyph(fonts, size, chr))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "Drawing {:?} at ({}, {}), size {}",
            text,
            x,
            y,
            size.points()
        );

        let mut cursor = u32::from(x);
        for glyph in glyphs {
            let cx = u16::try_from(cursor).map_err(|_| AddressingError::OutsideArea {
                x: cursor,
                y: u32::from(y),
                width: self.width(),
                height: self.height(),
            })?;
            self.check_area(cx, y, size.columns(), size.cell_height())?;
            self.rasterize(glyph, cx, y, size, color)?;
            cursor += u32::from(size.advance());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epd::error::GlyphLookupError;
    use crate::epd::font::FontTable;
    use crate::epd::{buffer_len, Rotation, HEIGHT, WHITE, WIDTH};

    /// Every glyph has only its top left pixel set
    fn dotted_table(size: FontSize) -> Vec<u8> {
        let bytes = size.bytes_per_glyph();
        let mut data = vec![0u8; 95 * bytes];
        for glyph in data.chunks_mut(bytes) {
            glyph[0] = 0x01;
        }
        data
    }

    fn black_pixels(fb: &FrameBuffer<'_>) -> Vec<(u16, u16)> {
        let mut black = Vec::new();
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                if fb.get_pixel(x, y) == Ok(Color::Black) {
                    black.push((x, y));
                }
            }
        }
        black
    }

    #[test]
    fn advances_half_the_size() {
        let data = dotted_table(FontSize::Size24);
        let font = FontTable::new(FontSize::Size24, &data).unwrap();
        let mut mem = vec![0u8; buffer_len(WIDTH, HEIGHT)];
        let mut fb =
            FrameBuffer::configure(&mut mem, WIDTH, HEIGHT, Rotation::Rotate180, Color::White)
                .unwrap();
        fb.clear(WHITE);

        fb.draw_string(&font, 0, 30, "AB", FontSize::Size24, Color::Black)
            .unwrap();
        assert_eq!(black_pixels(&fb), vec![(0, 30), (12, 30)]);
    }

    #[test]
    fn eight_point_cells_overlap() {
        // 6 pixel cells with a 4 pixel advance, the next glyph repaints two columns
        let mut data = vec![0u8; 95 * 6];
        let a = usize::from(b'A' - b' ') * 6;
        data[a + 5] = 0x01;
        let font = FontTable::new(FontSize::Size8, &data).unwrap();
        let mut mem = vec![0u8; buffer_len(WIDTH, HEIGHT)];
        let mut fb =
            FrameBuffer::configure(&mut mem, WIDTH, HEIGHT, Rotation::Rotate90, Color::White)
                .unwrap();
        fb.clear(WHITE);

        fb.draw_string(&font, 0, 0, "A", 8u16, Color::Black).unwrap();
        assert_eq!(black_pixels(&fb), vec![(5, 0)]);

        fb.draw_string(&font, 0, 0, "AA", 8u16, Color::Black).unwrap();
        assert_eq!(black_pixels(&fb), vec![(9, 0)]);
    }

    #[test]
    fn unknown_character_draws_nothing() {
        let data = dotted_table(FontSize::Size16);
        let font = FontTable::new(FontSize::Size16, &data).unwrap();
        let mut mem = vec![0u8; buffer_len(WIDTH, HEIGHT)];
        let mut fb =
            FrameBuffer::configure(&mut mem, WIDTH, HEIGHT, Rotation::Rotate0, Color::White)
                .unwrap();
        fb.clear(WHITE);

        let err = fb
            .draw_string(&font, 0, 0, "ok\n", FontSize::Size16, Color::Black)
            .unwrap_err();
        assert_eq!(
            err,
            GraphicsError::GlyphLookup(GlyphLookupError::OutOfRange {
                size: 16,
                chr: '\n'
            })
        );
        assert!(fb.buffer().iter().all(|&b| b == WHITE));
    }

    #[test]
    fn unsupported_size_draws_nothing() {
        let data = dotted_table(FontSize::Size8);
        let font = FontTable::new(FontSize::Size8, &data).unwrap();
        let mut mem = vec![0u8; buffer_len(WIDTH, HEIGHT)];
        let mut fb =
            FrameBuffer::configure(&mut mem, WIDTH, HEIGHT, Rotation::Rotate0, Color::White)
                .unwrap();
        fb.clear(WHITE);

        assert_eq!(
            fb.draw_string(&font, 0, 0, "A", 10u16, Color::Black),
            Err(GraphicsError::UnsupportedFontSize(10))
        );
        assert!(fb.buffer().iter().all(|&b| b == WHITE));
    }

    #[test]
    fn running_off_the_edge_keeps_earlier_characters() {
        let data = dotted_table(FontSize::Size48);
        let font = FontTable::new(FontSize::Size48, &data).unwrap();
        let mut mem = vec![0u8; buffer_len(WIDTH, HEIGHT)];
        let mut fb =
            FrameBuffer::configure(&mut mem, WIDTH, HEIGHT, Rotation::Rotate90, Color::White)
                .unwrap();
        fb.clear(WHITE);

        // 122 wide: cells at 0, 24, 48, 72 and 96 fit, the sixth would end at 144
        let err = fb
            .draw_string(&font, 0, 0, "HELLO!", FontSize::Size48, Color::Black)
            .unwrap_err();
        assert!(matches!(err, GraphicsError::Addressing(_)));
        assert_eq!(
            black_pixels(&fb),
            vec![(0, 0), (24, 0), (48, 0), (72, 0), (96, 0)]
        );
    }

    #[test]
    fn single_character_paints_exactly_its_cell() {
        let glyph = [0x7C, 0x12, 0x11, 0x12, 0x7C, 0x00];
        let mut data = vec![0u8; 95 * 6];
        let a = usize::from(b'A' - b' ') * 6;
        data[a..a + 6].copy_from_slice(&glyph);
        let font = FontTable::new(FontSize::Size8, &data).unwrap();

        for rotation in Rotation::ALL {
            let mut mem = vec![0u8; buffer_len(WIDTH, HEIGHT)];
            let mut fb =
                FrameBuffer::configure(&mut mem, WIDTH, HEIGHT, rotation, Color::White).unwrap();
            fb.clear(WHITE);
            fb.draw_string(&font, 0, 0, "A", 8u16, Color::Black)
                .unwrap();

            let mut expected = Vec::new();
            for y in 0..8u16 {
                for x in 0..6u16 {
                    if glyph[usize::from(x)] >> y & 1 == 1 {
                        expected.push((x, y));
                    }
                }
            }
            assert_eq!(black_pixels(&fb), expected, "{rotation}");
        }
    }

    /// Well formed glyphs except for 'B', which is one byte short
    struct ShortB(Vec<u8>);

    impl GlyphSource for ShortB {
        fn glyph(&self, size: FontSize, chr: char) -> Result<&[u8], GraphicsError> {
            let len = size.bytes_per_glyph();
            if chr == 'B' {
                Ok(&self.0[..len - 1])
            } else {
                Ok(&self.0[..len])
            }
        }
    }

    #[test]
    fn glyph_of_the_wrong_length_draws_nothing() {
        let source = ShortB(vec![0xFF; FontSize::Size16.bytes_per_glyph()]);
        let mut mem = vec![0u8; buffer_len(WIDTH, HEIGHT)];
        let mut fb =
            FrameBuffer::configure(&mut mem, WIDTH, HEIGHT, Rotation::Rotate0, Color::White)
                .unwrap();
        fb.clear(WHITE);

        let err = fb
            .draw_string(&source, 0, 0, "AB", FontSize::Size16, Color::Black)
            .unwrap_err();
        assert_eq!(
            err,
            GraphicsError::GlyphLookup(GlyphLookupError::WrongLength {
                size: 16,
                chr: 'B',
                len: 15
            })
        );
        assert!(fb.buffer().iter().all(|&b| b == WHITE));
    }

    #[test]
    fn measures_advance() {
        assert_eq!(text_width("Hello World!", FontSize::Size24), 144);
        assert_eq!(text_width("", FontSize::Size8), 0);
        assert_eq!(text_width("abc", FontSize::Size8), 12);
    }
}
