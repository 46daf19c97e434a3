//! Bit-packed framebuffer and rotation-aware pixel addressing

use crate::epd::color::Color;
use crate::epd::error::{AddressingError, ConfigError, GraphicsError};
use crate::epd::rotation::Rotation;

/// 1bpp image of the panel, drawn into a byte region owned by the caller
///
/// Geometry is fixed by [`FrameBuffer::configure`]; every drawing call
/// mutates the borrowed bytes in place. Nothing is global, so any number of
/// buffers can be alive at the same time.
#[derive(Debug)]
pub struct FrameBuffer<'a> {
    buffer: &'a mut [u8],
    /// Logical width, after rotation
    width: u16,
    /// Logical height, after rotation
    height: u16,
    width_memory: u16,
    height_memory: u16,
    width_bytes: u16,
    height_bytes: u16,
    rotation: Rotation,
    default_color: Color,
}

impl<'a> FrameBuffer<'a> {
    /// Configure a framebuffer over `buffer` for a `width` x `height` panel
    ///
    /// `width` and `height` are the raw panel dimensions. The buffer contents
    /// are left untouched, call [`FrameBuffer::clear`] before drawing.
    pub fn configure(
        buffer: &'a mut [u8],
        width: u16,
        height: u16,
        rotation: Rotation,
        default_color: Color,
    ) -> Result<Self, GraphicsError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGeometry { width, height }.into());
        }

        let width_bytes = width.div_ceil(8);
        let height_bytes = height;
        let required = usize::from(width_bytes) * usize::from(height_bytes);
        if buffer.len() < required {
            return Err(ConfigError::BufferTooSmall {
                required,
                actual: buffer.len(),
            }
            .into());
        }

        let (logical_width, logical_height) = if rotation.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        };

        log::info!(
            "Configured {}x{} framebuffer ({} bytes), rotation {}, drawing area {}x{}",
            width,
            height,
            required,
            rotation,
            logical_width,
            logical_height
        );

        Ok(FrameBuffer {
            buffer,
            width: logical_width,
            height: logical_height,
            width_memory: width,
            height_memory: height,
            width_bytes,
            height_bytes,
            rotation,
            default_color,
        })
    }

    /// Fill the whole image with `color`, a full byte (eight pixels)
    ///
    /// Works on physical memory, so the rotation does not matter. Bytes of
    /// the backing region past the image are not touched.
    pub fn clear(&mut self, color: u8) {
        log::debug!("Clearing framebuffer with 0x{:02X}", color);
        let len = self.len();
        self.buffer[..len].fill(color);
    }

    /// Fill the whole image with the configured default color
    pub fn clear_default(&mut self) {
        self.clear(self.default_color.byte_value());
    }

    /// Logical width, the exclusive upper bound for `x`
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Logical height, the exclusive upper bound for `y`
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Raw panel width in pixels
    pub fn width_memory(&self) -> u16 {
        self.width_memory
    }

    /// Raw panel height in pixels
    pub fn height_memory(&self) -> u16 {
        self.height_memory
    }

    /// Bytes per physical row
    pub fn width_bytes(&self) -> u16 {
        self.width_bytes
    }

    /// Physical rows
    pub fn height_bytes(&self) -> u16 {
        self.height_bytes
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Bytes making up the image
    pub fn len(&self) -> usize {
        usize::from(self.width_bytes) * usize::from(self.height_bytes)
    }

    /// Always false, configuration rejects empty geometry
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The image in panel memory layout, ready to push to the controller
    pub fn buffer(&self) -> &[u8] {
        &self.buffer[..self.len()]
    }

    /// Physical `(X, Y)` of the logical pixel `(x, y)`
    pub fn physical_position(&self, x: u16, y: u16) -> Result<(u16, u16), GraphicsError> {
        if x >= self.width || y >= self.height {
            return Err(AddressingError::OutsideArea {
                x: u32::from(x),
                y: u32::from(y),
                width: self.width,
                height: self.height,
            }
            .into());
        }

        // With the area check above none of these can underflow
        let position = match self.rotation {
            Rotation::Rotate0 => (y, x),
            Rotation::Rotate90 => (x, self.height_memory - y - 1),
            Rotation::Rotate180 => (self.width_memory - y - 1, self.height_memory - x - 1),
            Rotation::Rotate270 => (self.width_memory - x - 1, y),
        };
        Ok(position)
    }

    /// Paint the logical pixel `(x, y)`
    ///
    /// Black clears the bit, white sets it.
    pub fn set_pixel(&mut self, x: u16, y: u16, color: Color) -> Result<(), GraphicsError> {
        let (addr, mask) = self.bit_address(x, y)?;
        let len = self.buffer.len();
        let byte = self
            .buffer
            .get_mut(addr)
            .ok_or(AddressingError::OutsideBuffer { addr, len })?;
        match color {
            Color::Black => *byte &= !mask,
            Color::White => *byte |= mask,
        }
        Ok(())
    }

    /// Read back the logical pixel `(x, y)`
    pub fn get_pixel(&self, x: u16, y: u16) -> Result<Color, GraphicsError> {
        let (addr, mask) = self.bit_address(x, y)?;
        let byte = self.buffer.get(addr).ok_or(AddressingError::OutsideBuffer {
            addr,
            len: self.buffer.len(),
        })?;
        Ok(Color::from_bit(byte & mask != 0))
    }

    /// Byte offset and bit mask of a logical pixel, MSB is the leftmost pixel
    fn bit_address(&self, x: u16, y: u16) -> Result<(usize, u8), GraphicsError> {
        let (px, py) = self.physical_position(x, y)?;
        let addr = usize::from(px / 8) + usize::from(py) * usize::from(self.width_bytes);
        if addr >= self.len() {
            return Err(AddressingError::OutsideBuffer {
                addr,
                len: self.len(),
            }
            .into());
        }
        Ok((addr, 0x80 >> (px % 8)))
    }

    /// Whether the `columns` x `rows` block anchored at `(x, y)` is drawable
    pub(crate) fn check_area(
        &self,
        x: u16,
        y: u16,
        columns: u16,
        rows: u16,
    ) -> Result<(), GraphicsError> {
        let right = u32::from(x) + u32::from(columns);
        let bottom = u32::from(y) + u32::from(rows);
        if right > u32::from(self.width) || bottom > u32::from(self.height) {
            return Err(AddressingError::OutsideArea {
                x: right.saturating_sub(1),
                y: bottom.saturating_sub(1),
                width: self.width,
                height: self.height,
            }
            .into());
        }
        Ok(())
    }
}
