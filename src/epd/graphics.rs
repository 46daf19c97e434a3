//! embedded-graphics support
//!
//! Primitives and embedded-graphics text can be mixed with the bitmap fonts.
//! `BinaryColor::On` draws black. Pixels outside the drawing area are
//! clipped, as embedded-graphics expects from a draw target.

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::epd::buffer::FrameBuffer;
use crate::epd::error::GraphicsError;

impl DrawTarget for FrameBuffer<'_> {
    type Color = BinaryColor;
    type Error = GraphicsError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) else {
                continue;
            };
            if x < self.width() && y < self.height() {
                self.set_pixel(x, y, color.into())?;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let color: crate::epd::Color = color.into();
        FrameBuffer::clear(self, color.byte_value());
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer<'_> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}
