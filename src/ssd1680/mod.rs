//! SSD1680 ePaper transport
//!
//! Pushes a [`FrameBuffer`](crate::epd::FrameBuffer) to an SSD1680 class
//! controller over SPI. Only the black/white RAM and full refresh are used.
//!
//! This driver is losely modeled after the
//! [epd-waveshare](https://github.com/caemor/epd-waveshare) drivers but built for my needs.
//!
//!
//! ### Usage
//! 1. draw into a framebuffer
//! 1. create the driver with the panel geometry and call [`PanelTransport::init`](crate::epd::PanelTransport::init)
//! 1. send the frame with [`PanelTransport::display_frame`](crate::epd::PanelTransport::display_frame)
//!

pub mod driver;
pub mod interface;

mod cmd;
mod flag;

pub use cmd::Cmd;
pub use flag::Flag;

/// Maximum display height this driver supports
pub const MAX_HEIGHT: u16 = 296;

/// Maximum display width this driver supports
pub const MAX_WIDTH: u16 = 176;
