//! Panel rotation

use core::fmt;

use crate::epd::error::{ConfigError, GraphicsError};

/// Display rotation, only 90° increments supported
///
/// `Rotate0` and `Rotate180` draw along the long side of the panel: the logical
/// axes are the physical axes swapped. `Rotate90` and `Rotate270` keep the
/// physical axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// Logical x runs down the physical rows
    #[default]
    Rotate0,
    /// Physical columns, rows counted from the bottom
    Rotate90,
    /// Logical x runs up the physical rows
    Rotate180,
    /// Physical rows, columns counted from the right
    Rotate270,
}

impl Rotation {
    /// All supported rotations
    pub const ALL: [Rotation; 4] = [
        Rotation::Rotate0,
        Rotation::Rotate90,
        Rotation::Rotate180,
        Rotation::Rotate270,
    ];

    /// Rotation in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Rotation::Rotate0 => 0,
            Rotation::Rotate90 => 90,
            Rotation::Rotate180 => 180,
            Rotation::Rotate270 => 270,
        }
    }

    /// Whether the logical axes are the physical ones swapped
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Rotate0 | Rotation::Rotate180)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = GraphicsError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Rotate0),
            90 => Ok(Rotation::Rotate90),
            180 => Ok(Rotation::Rotate180),
            270 => Ok(Rotation::Rotate270),
            other => Err(ConfigError::InvalidRotation(other).into()),
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}
