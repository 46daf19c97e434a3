//! Fixed-width column fonts
//!
//! A glyph is a run of bytes, each byte one column of eight pixels with the
//! least significant bit on top. Glyphs taller than eight pixels are stacked
//! bands: the first `size / 2` bytes are the top band, the next `size / 2` the
//! band below it, and so on. The 8pt font is the exception, a 6x8 cell of six
//! single-band columns.
//!
//! Tables start at the space character and are looked up by
//! `char - ' '`. The table data itself comes from outside the crate, either
//! as static vendor arrays ([`FontTable::new`]) or converted from an
//! embedded-graphics font ([`OwnedFontTable::from_mono_font`]).

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

use crate::epd::error::{ConfigError, GlyphLookupError, GraphicsError};

/// First character of every table
const FIRST_CHAR: char = ' ';

/// Last character converted from embedded-graphics fonts
const LAST_CHAR: char = '~';

/// Supported font sizes, in points (glyph height)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontSize {
    /// 6x8 cell
    Size8,
    /// 6x12 glyph in two bands
    Size12,
    /// 8x16 glyph in two bands
    Size16,
    /// 12x24 glyph in three bands
    Size24,
    /// 24x48 glyph in six bands
    Size48,
}

impl FontSize {
    /// All supported sizes
    pub const ALL: [FontSize; 5] = [
        FontSize::Size8,
        FontSize::Size12,
        FontSize::Size16,
        FontSize::Size24,
        FontSize::Size48,
    ];

    pub const fn points(self) -> u16 {
        match self {
            FontSize::Size8 => 8,
            FontSize::Size12 => 12,
            FontSize::Size16 => 16,
            FontSize::Size24 => 24,
            FontSize::Size48 => 48,
        }
    }

    /// Columns per band, the glyph width
    pub const fn columns(self) -> u16 {
        match self {
            FontSize::Size8 => 6,
            _ => self.points() / 2,
        }
    }

    /// Number of stacked eight pixel bands
    pub const fn bands(self) -> u16 {
        match self {
            FontSize::Size8 => 1,
            _ => self.points().div_ceil(8),
        }
    }

    /// Rows a glyph repaints, a whole number of bands
    pub const fn cell_height(self) -> u16 {
        self.bands() * 8
    }

    /// Bytes per glyph: 6 for the 8pt font, `ceil(size / 8) * (size / 2)` otherwise
    pub const fn bytes_per_glyph(self) -> usize {
        self.columns() as usize * self.bands() as usize
    }

    /// Horizontal distance between consecutive characters of a string
    pub const fn advance(self) -> u16 {
        self.points() / 2
    }

    const fn index(self) -> usize {
        match self {
            FontSize::Size8 => 0,
            FontSize::Size12 => 1,
            FontSize::Size16 => 2,
            FontSize::Size24 => 3,
            FontSize::Size48 => 4,
        }
    }
}

impl TryFrom<u16> for FontSize {
    type Error = GraphicsError;

    fn try_from(points: u16) -> Result<Self, Self::Error> {
        match points {
            8 => Ok(FontSize::Size8),
            12 => Ok(FontSize::Size12),
            16 => Ok(FontSize::Size16),
            24 => Ok(FontSize::Size24),
            48 => Ok(FontSize::Size48),
            other => Err(GraphicsError::UnsupportedFontSize(other)),
        }
    }
}

/// Lookup of packed glyph bytes by size and character
pub trait GlyphSource {
    /// The `bytes_per_glyph` bytes for `chr` at `size`
    fn glyph(&self, size: FontSize, chr: char) -> Result<&[u8], GraphicsError>;
}

/// Look up `chr` and make sure the glyph fills exactly one cell
pub(crate) fn cell_glyph<G>(fonts: &G, size: FontSize, chr: char) -> Result<&[u8], GraphicsError>
where
    G: GlyphSource + ?Sized,
{
    let glyph = fonts.glyph(size, chr)?;
    if glyph.len() != size.bytes_per_glyph() {
        return Err(GlyphLookupError::WrongLength {
            size: size.points(),
            chr,
            len: glyph.len(),
        }
        .into());
    }
    Ok(glyph)
}

/// Borrowed glyph table for one font size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontTable<'a> {
    size: FontSize,
    data: &'a [u8],
}

impl<'a> FontTable<'a> {
    /// Wrap flat glyph data, glyphs back to back starting at `' '`
    pub fn new(size: FontSize, data: &'a [u8]) -> Result<Self, GraphicsError> {
        if data.is_empty() || data.len() % size.bytes_per_glyph() != 0 {
            return Err(ConfigError::MalformedFontTable {
                size: size.points(),
                len: data.len(),
            }
            .into());
        }
        Ok(FontTable { size, data })
    }

    pub fn size(&self) -> FontSize {
        self.size
    }

    /// Number of glyphs in the table
    pub fn glyph_count(&self) -> usize {
        self.data.len() / self.size.bytes_per_glyph()
    }

    /// Glyph bytes for `chr`
    pub fn lookup(&self, chr: char) -> Result<&'a [u8], GraphicsError> {
        let out_of_range = GlyphLookupError::OutOfRange {
            size: self.size.points(),
            chr,
        };
        let offset = (chr as u32)
            .checked_sub(FIRST_CHAR as u32)
            .ok_or(out_of_range)? as usize;
        let bytes = self.size.bytes_per_glyph();
        let start = offset.checked_mul(bytes).ok_or(out_of_range)?;
        let glyph = self
            .data
            .get(start..start + bytes)
            .ok_or(out_of_range)?;
        Ok(glyph)
    }
}

impl GlyphSource for FontTable<'_> {
    fn glyph(&self, size: FontSize, chr: char) -> Result<&[u8], GraphicsError> {
        if size != self.size {
            return Err(GlyphLookupError::MissingTable {
                size: size.points(),
            }
            .into());
        }
        self.lookup(chr)
    }
}

/// One optional table per font size
#[derive(Debug, Clone, Copy, Default)]
pub struct FontSet<'a> {
    tables: [Option<FontTable<'a>>; 5],
}

impl<'a> FontSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `table`, replacing any table of the same size
    pub fn with(mut self, table: FontTable<'a>) -> Self {
        self.insert(table);
        self
    }

    /// Add `table`, returning the one it replaced
    pub fn insert(&mut self, table: FontTable<'a>) -> Option<FontTable<'a>> {
        self.tables[table.size().index()].replace(table)
    }

    pub fn get(&self, size: FontSize) -> Option<&FontTable<'a>> {
        self.tables[size.index()].as_ref()
    }
}

impl GlyphSource for FontSet<'_> {
    fn glyph(&self, size: FontSize, chr: char) -> Result<&[u8], GraphicsError> {
        let table = self.get(size).ok_or(GlyphLookupError::MissingTable {
            size: size.points(),
        })?;
        table.lookup(chr)
    }
}

/// Glyph table owning its data, built at run time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedFontTable {
    size: FontSize,
    data: Vec<u8>,
}

impl OwnedFontTable {
    /// Pack the printable ASCII range of an embedded-graphics font
    ///
    /// Each character is drawn at the top left of a `size` glyph cell and
    /// packed into column bands. The source character must fit the cell.
    pub fn from_mono_font(size: FontSize, font: &MonoFont<'_>) -> Result<Self, GraphicsError> {
        let character = font.character_size;
        if character.width > u32::from(size.columns())
            || character.height > u32::from(size.cell_height())
        {
            return Err(ConfigError::FontTooLarge {
                size: size.points(),
                width: character.width,
                height: character.height,
            }
            .into());
        }

        let style = MonoTextStyle::new(font, BinaryColor::On);
        let mut canvas = GlyphCanvas::new(size);
        let mut data = Vec::with_capacity(95 * size.bytes_per_glyph());
        let mut encoded = [0u8; 4];

        for chr in FIRST_CHAR..=LAST_CHAR {
            canvas.reset();
            Text::with_baseline(
                chr.encode_utf8(&mut encoded),
                Point::zero(),
                style,
                Baseline::Top,
            )
            .draw(&mut canvas)
            .unwrap_or_else(|never| match never {});
            canvas.pack_into(&mut data);
        }

        log::debug!(
            "Packed {}x{} font into {} glyphs of {} bytes for size {}",
            character.width,
            character.height,
            data.len() / size.bytes_per_glyph(),
            size.bytes_per_glyph(),
            size.points()
        );

        Ok(OwnedFontTable { size, data })
    }

    /// Take ownership of flat glyph data
    pub fn from_vec(size: FontSize, data: Vec<u8>) -> Result<Self, GraphicsError> {
        FontTable::new(size, &data)?;
        Ok(OwnedFontTable { size, data })
    }

    pub fn size(&self) -> FontSize {
        self.size
    }

    /// Borrow as a [`FontTable`] for a [`FontSet`]
    pub fn as_table(&self) -> FontTable<'_> {
        FontTable {
            size: self.size,
            data: &self.data,
        }
    }
}

impl GlyphSource for OwnedFontTable {
    fn glyph(&self, size: FontSize, chr: char) -> Result<&[u8], GraphicsError> {
        if size != self.size {
            return Err(GlyphLookupError::MissingTable {
                size: size.points(),
            }
            .into());
        }
        FontTable {
            size: self.size,
            data: &self.data,
        }
        .lookup(chr)
    }
}

/// One glyph cell to render embedded-graphics text into
struct GlyphCanvas {
    size: FontSize,
    pixels: Vec<bool>,
}

impl GlyphCanvas {
    fn new(size: FontSize) -> Self {
        let cells = usize::from(size.columns()) * usize::from(size.cell_height());
        GlyphCanvas {
            size,
            pixels: vec![false; cells],
        }
    }

    fn reset(&mut self) {
        self.pixels.fill(false);
    }

    /// Append the cell as column bands, LSB on top
    fn pack_into(&self, data: &mut Vec<u8>) {
        let columns = usize::from(self.size.columns());
        for band in 0..usize::from(self.size.bands()) {
            for column in 0..columns {
                let mut byte = 0u8;
                for bit in 0..8 {
                    let row = band * 8 + bit;
                    if self.pixels[row * columns + column] {
                        byte |= 1 << bit;
                    }
                }
                data.push(byte);
            }
        }
    }
}

impl OriginDimensions for GlyphCanvas {
    fn size(&self) -> Size {
        Size::new(
            u32::from(self.size.columns()),
            u32::from(self.size.cell_height()),
        )
    }
}

impl DrawTarget for GlyphCanvas {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let columns = i32::from(self.size.columns());
        let rows = i32::from(self.size.cell_height());
        for Pixel(point, color) in pixels {
            if (0..columns).contains(&point.x) && (0..rows).contains(&point.y) {
                let index = (point.y * columns + point.x) as usize;
                self.pixels[index] = color.is_on();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_5X8, FONT_6X12, FONT_6X9};

    #[test]
    fn glyph_sizes() {
        assert_eq!(FontSize::Size8.bytes_per_glyph(), 6);
        assert_eq!(FontSize::Size12.bytes_per_glyph(), 12);
        assert_eq!(FontSize::Size16.bytes_per_glyph(), 16);
        assert_eq!(FontSize::Size24.bytes_per_glyph(), 36);
        assert_eq!(FontSize::Size48.bytes_per_glyph(), 144);

        assert_eq!(FontSize::Size8.cell_height(), 8);
        assert_eq!(FontSize::Size12.cell_height(), 16);
        assert_eq!(FontSize::Size48.cell_height(), 48);
        assert_eq!(FontSize::Size8.advance(), 4);
        assert_eq!(FontSize::Size24.advance(), 12);
    }

    #[test]
    fn size_from_points() {
        for size in FontSize::ALL {
            assert_eq!(FontSize::try_from(size.points()), Ok(size));
        }
        assert_eq!(
            FontSize::try_from(10u16),
            Err(GraphicsError::UnsupportedFontSize(10))
        );
        assert!(FontSize::try_from(0u16).is_err());
    }

    #[test]
    fn table_rejects_partial_glyphs() {
        let data = [0u8; 7];
        assert_eq!(
            FontTable::new(FontSize::Size8, &data),
            Err(GraphicsError::Configuration(
                ConfigError::MalformedFontTable { size: 8, len: 7 }
            ))
        );
        assert!(FontTable::new(FontSize::Size8, &[]).is_err());
    }

    #[test]
    fn lookup_is_offset_from_space() {
        let data: Vec<u8> = (0..18).collect();
        let table = FontTable::new(FontSize::Size8, &data).unwrap();
        assert_eq!(table.glyph_count(), 3);
        assert_eq!(table.lookup(' ').unwrap(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(table.lookup('"').unwrap(), &[12, 13, 14, 15, 16, 17]);
    }

    #[test]
    fn lookup_out_of_range() {
        let data = [0u8; 18];
        let table = FontTable::new(FontSize::Size8, &data).unwrap();
        let below = GraphicsError::GlyphLookup(GlyphLookupError::OutOfRange {
            size: 8,
            chr: '\n',
        });
        assert_eq!(table.lookup('\n'), Err(below));
        assert!(table.lookup('#').is_err());
        assert!(table.lookup('\u{10FFFF}').is_err());
    }

    #[test]
    fn font_set_routes_by_size() {
        let small = [1u8; 6];
        let large = [2u8; 36];
        let fonts = FontSet::new()
            .with(FontTable::new(FontSize::Size8, &small).unwrap())
            .with(FontTable::new(FontSize::Size24, &large).unwrap());

        assert_eq!(fonts.glyph(FontSize::Size8, ' ').unwrap(), &small);
        assert_eq!(fonts.glyph(FontSize::Size24, ' ').unwrap(), &large);
        assert_eq!(
            fonts.glyph(FontSize::Size16, ' '),
            Err(GraphicsError::GlyphLookup(GlyphLookupError::MissingTable {
                size: 16
            }))
        );
    }

    #[test]
    fn single_table_only_answers_its_size() {
        let data = [0u8; 6];
        let table = FontTable::new(FontSize::Size8, &data).unwrap();
        assert!(table.glyph(FontSize::Size8, ' ').is_ok());
        assert!(table.glyph(FontSize::Size12, ' ').is_err());
    }

    #[test]
    fn packs_mono_font_into_columns() {
        let table = OwnedFontTable::from_mono_font(FontSize::Size8, &FONT_5X8).unwrap();
        assert_eq!(table.as_table().glyph_count(), 95);

        // a space is blank, anything visible has ink
        assert!(table.glyph(FontSize::Size8, ' ').unwrap().iter().all(|&b| b == 0));
        assert!(table.glyph(FontSize::Size8, 'A').unwrap().iter().any(|&b| b != 0));
        // the sixth column is outside the 5 pixel wide font
        assert_eq!(table.glyph(FontSize::Size8, 'W').unwrap()[5], 0);
        // '|' is a single vertical stroke
        let bar = table.glyph(FontSize::Size8, '|').unwrap();
        assert_eq!(bar.iter().filter(|&&b| b != 0).count(), 1);
    }

    #[test]
    fn packs_taller_fonts_into_bands() {
        let table = OwnedFontTable::from_mono_font(FontSize::Size12, &FONT_6X12).unwrap();
        let glyph = table.glyph(FontSize::Size12, '|').unwrap();
        assert_eq!(glyph.len(), 12);
        // the stroke continues from the top band into the second one
        let column = glyph.iter().position(|&b| b != 0).unwrap();
        assert!(column < 6);
        assert_ne!(glyph[column + 6], 0);

        let large = OwnedFontTable::from_mono_font(FontSize::Size24, &FONT_10X20).unwrap();
        assert_eq!(large.as_table().glyph_count(), 95);
    }

    #[test]
    fn rejects_fonts_larger_than_the_cell() {
        assert_eq!(
            OwnedFontTable::from_mono_font(FontSize::Size8, &FONT_6X9),
            Err(GraphicsError::Configuration(ConfigError::FontTooLarge {
                size: 8,
                width: 6,
                height: 9
            }))
        );
    }

    #[test]
    fn owned_from_vec_validates() {
        assert!(OwnedFontTable::from_vec(FontSize::Size16, vec![0; 32]).is_ok());
        assert!(OwnedFontTable::from_vec(FontSize::Size16, vec![0; 30]).is_err());
    }
}
