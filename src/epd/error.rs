//! Errors reported by the framebuffer and the font renderer
//!
//! Everything here is a caller mistake (wrong geometry, missing glyph, drawing
//! off the panel). Nothing is retried and nothing is drawn when an operation
//! is rejected up front.

use core::convert::Infallible;
use core::fmt;

/// Framebuffer or font table errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsError {
    /// Geometry or font table rejected at construction
    Configuration(ConfigError),
    /// Font size other than 8, 12, 16, 24 or 48
    UnsupportedFontSize(u16),
    /// No glyph for a character
    GlyphLookup(GlyphLookupError),
    /// Coordinates outside the drawable area
    Addressing(AddressingError),
}

/// Rejected configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Backing buffer shorter than `ceil(width / 8) * height`
    BufferTooSmall {
        /// Bytes the geometry needs
        required: usize,
        /// Bytes handed in
        actual: usize,
    },
    /// Width or height of zero
    EmptyGeometry {
        /// Panel width in pixels
        width: u16,
        /// Panel height in pixels
        height: u16,
    },
    /// Rotation in degrees that is not 0, 90, 180 or 270
    InvalidRotation(u16),
    /// Glyph data that is not a whole number of glyphs
    MalformedFontTable {
        /// Font size in points
        size: u16,
        /// Length of the glyph data
        len: usize,
    },
    /// Source font cell bigger than the target glyph cell
    FontTooLarge {
        /// Target font size in points
        size: u16,
        /// Source character width
        width: u32,
        /// Source character height
        height: u32,
    },
}

/// Failed glyph lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphLookupError {
    /// No table loaded for the size
    MissingTable {
        /// Font size in points
        size: u16,
    },
    /// Character below the space character or past the end of the table
    OutOfRange {
        /// Font size in points
        size: u16,
        /// Character looked up
        chr: char,
    },
    /// Glyph source returned other than `bytes_per_glyph` bytes
    WrongLength {
        /// Font size in points
        size: u16,
        /// Character looked up
        chr: char,
        /// Bytes returned
        len: usize,
    },
}

/// Coordinates that do not land inside the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingError {
    /// Logical coordinates outside `width` x `height`
    OutsideArea {
        /// Logical x
        x: u32,
        /// Logical y
        y: u32,
        /// Logical width
        width: u16,
        /// Logical height
        height: u16,
    },
    /// Physical position past the end of the backing buffer
    OutsideBuffer {
        /// Byte offset
        addr: usize,
        /// Buffer length
        len: usize,
    },
}

impl From<ConfigError> for GraphicsError {
    fn from(err: ConfigError) -> Self {
        GraphicsError::Configuration(err)
    }
}

impl From<GlyphLookupError> for GraphicsError {
    fn from(err: GlyphLookupError) -> Self {
        GraphicsError::GlyphLookup(err)
    }
}

impl From<AddressingError> for GraphicsError {
    fn from(err: AddressingError) -> Self {
        GraphicsError::Addressing(err)
    }
}

/// Lets an already valid `FontSize` go through the same `TryInto` as a raw size
impl From<Infallible> for GraphicsError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsError::Configuration(err) => write!(f, "configuration error: {err}"),
            GraphicsError::UnsupportedFontSize(size) => write!(
                f,
                "unsupported font size {size}, expected one of 8, 12, 16, 24, 48"
            ),
            GraphicsError::GlyphLookup(err) => write!(f, "glyph lookup error: {err}"),
            GraphicsError::Addressing(err) => write!(f, "addressing error: {err}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BufferTooSmall { required, actual } => write!(
                f,
                "buffer of {actual} bytes is too small, geometry needs {required}"
            ),
            ConfigError::EmptyGeometry { width, height } => {
                write!(f, "empty geometry {width}x{height}")
            }
            ConfigError::InvalidRotation(degrees) => {
                write!(f, "rotation {degrees} is not one of 0, 90, 180, 270")
            }
            ConfigError::MalformedFontTable { size, len } => write!(
                f,
                "font table for size {size} has {len} bytes, not a whole number of glyphs"
            ),
            ConfigError::FontTooLarge {
                size,
                width,
                height,
            } => write!(
                f,
                "{width}x{height} font does not fit the size {size} glyph cell"
            ),
        }
    }
}

impl fmt::Display for GlyphLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphLookupError::MissingTable { size } => write!(f, "no font table for size {size}"),
            GlyphLookupError::OutOfRange { size, chr } => {
                write!(f, "no glyph for {chr:?} in the size {size} font")
            }
            GlyphLookupError::WrongLength { size, chr, len } => {
                write!(f, "glyph for {chr:?} in the size {size} font is {len} bytes")
            }
        }
    }
}

impl fmt::Display for AddressingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressingError::OutsideArea {
                x,
                y,
                width,
                height,
            } => write!(f, "({x}, {y}) is outside the {width}x{height} drawing area"),
            AddressingError::OutsideBuffer { addr, len } => {
                write!(f, "byte {addr} is past the end of the {len} byte buffer")
            }
        }
    }
}

impl std::error::Error for GraphicsError {}
