//! SSD1680 Display Driver Implementation
//!
//! Implements [`PanelTransport`] for an SSD1680 controller driven over SPI.
//!
//! ## Sequences
//!
//! ### `init()`
//! Hardware reset, software reset, then driver output control, data entry
//! mode, RAM window, border waveform and temperature sensor. The RAM window
//! and gate count come from the panel geometry given to [`Ssd1680::new`].
//!
//! ### `push()`
//! Reset the RAM counters to the origin and stream the image into the
//! black/white RAM (0x24). The image must be exactly
//! `ceil(width / 8) * height` bytes, the framebuffer layout.
//!
//! ### `refresh()`
//! Display Update Control 2 with the full update sequence (0xF4), master
//! activation, then wait for the BUSY pin to go LOW. Takes 1-3 seconds on a
//! real panel.
//!
//! ### Polarity
//!
//! The framebuffer stores white as a set bit, which is what the black/white
//! RAM expects, so data is sent without inversion.

pub use display_interface::DisplayError;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

use crate::epd::{buffer_len, PanelTransport};
use crate::ssd1680::interface::DisplayInterface;
use crate::ssd1680::{cmd::Cmd, flag::Flag, MAX_HEIGHT, MAX_WIDTH};

/// SSD1680 E-Paper Display Driver
///
/// ## Type Parameters
///
/// - `SPI` - SPI device for communication
/// - `BSY` - BUSY input pin (HIGH when display is busy)
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `DELAY` - Delay provider for timing
pub struct Ssd1680<SPI, BSY, DC, RST, DELAY> {
    /// The display interface
    interface: DisplayInterface<SPI, BSY, DC, RST>,
    delay: DELAY,
    /// Panel width in pixels (source lines)
    width: u16,
    /// Panel height in pixels (gate lines)
    height: u16,
}

impl<SPI, BSY, DC, RST, DELAY> Ssd1680<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    RST: OutputPin,
    DC: OutputPin,
    BSY: InputPin,
    DELAY: DelayNs,
{
    /// Create the driver for a `width` x `height` panel, without touching the hardware
    ///
    /// The geometry must be at least 1x1 and at most [`MAX_WIDTH`] x [`MAX_HEIGHT`].
    pub fn new(
        spi: SPI,
        busy: BSY,
        dc: DC,
        rst: RST,
        delay: DELAY,
        width: u16,
        height: u16,
    ) -> Result<Self, DisplayError> {
        if !(1..=MAX_WIDTH).contains(&width) || !(1..=MAX_HEIGHT).contains(&height) {
            log::error!(
                "Panel of {}x{} is outside the supported {}x{}",
                width,
                height,
                MAX_WIDTH,
                MAX_HEIGHT
            );
            return Err(DisplayError::OutOfBoundsError);
        }

        Ok(Ssd1680 {
            interface: DisplayInterface::new(spi, busy, dc, rst),
            delay,
            width,
            height,
        })
    }

    /// Give the bus, pins and delay back
    pub fn release(self) -> (SPI, BSY, DC, RST, DELAY) {
        let (spi, busy, dc, rst) = self.interface.release();
        (spi, busy, dc, rst, self.delay)
    }

    /// Bytes `push()` expects
    pub fn frame_len(&self) -> usize {
        buffer_len(self.width, self.height)
    }

    /// Enter deep sleep mode, a hardware reset and `init()` wake it up again
    pub fn sleep(&mut self) -> Result<(), DisplayError> {
        log::info!("Entering deep sleep");
        self.interface
            .cmd_with_data(Cmd::DEEP_SLEEP_MODE, &[Flag::DEEP_SLEEP_MODE_1])
    }

    /// Set RAM X and Y counters to origin (0, 0)
    fn reset_ram_counters(&mut self) -> Result<(), DisplayError> {
        self.interface.cmd_with_data(Cmd::SET_RAMX_COUNTER, &[0x00])?;
        self.interface
            .cmd_with_data(Cmd::SET_RAMY_COUNTER, &[0x00, 0x00])
    }

    /// Set RAM window to the full frame
    fn set_full_ram_window(&mut self) -> Result<(), DisplayError> {
        let ram_x_end = (self.width.div_ceil(8) - 1) as u8;
        let [y_end_lsb, y_end_msb] = (self.height - 1).to_le_bytes();

        self.interface
            .cmd_with_data(Cmd::SET_RAMXPOS, &[0x00, ram_x_end])?;
        self.interface
            .cmd_with_data(Cmd::SET_RAMYPOS, &[0x00, 0x00, y_end_lsb, y_end_msb])
    }

    fn wait_until_idle(&mut self) {
        if !self.interface.wait_busy_low(&mut self.delay) {
            log::warn!("Display still busy, continuing anyway");
        }
    }
}

impl<SPI, BSY, DC, RST, DELAY> PanelTransport for Ssd1680<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    RST: OutputPin,
    DC: OutputPin,
    BSY: InputPin,
    DELAY: DelayNs,
{
    type Error = DisplayError;

    fn init(&mut self) -> Result<(), DisplayError> {
        log::info!(
            "Initializing SSD1680 for a {}x{} panel",
            self.width,
            self.height
        );

        self.interface.reset(&mut self.delay)?;
        self.delay.delay_ms(10);

        self.interface.cmd(Cmd::SW_RESET)?;
        self.wait_until_idle();
        self.delay.delay_ms(10);

        // Gate lines = height
        let [mux_lsb, mux_msb] = (self.height - 1).to_le_bytes();
        self.interface.cmd_with_data(
            Cmd::DRIVER_CONTROL,
            &[mux_lsb, mux_msb, Flag::DRIVER_OUTPUT_GATE_SCAN_FROM_G0],
        )?;

        // X-increment, Y-increment, the framebuffer row-major layout
        self.interface
            .cmd_with_data(Cmd::DATA_ENTRY_MODE, &[Flag::DATA_ENTRY_INCRY_INCRX])?;

        self.set_full_ram_window()?;

        self.interface.cmd_with_data(
            Cmd::BORDER_WAVEFORM_CONTROL,
            &[Flag::BORDER_WAVEFORM_FOLLOW_LUT | Flag::BORDER_WAVEFORM_LUT1],
        )?;

        self.interface
            .cmd_with_data(Cmd::TEMP_CONTROL, &[Flag::INTERNAL_TEMP_SENSOR])?;

        self.reset_ram_counters()?;
        self.wait_until_idle();
        Ok(())
    }

    fn push(&mut self, buffer: &[u8]) -> Result<(), DisplayError> {
        if buffer.len() != self.frame_len() {
            log::error!(
                "Frame of {} bytes does not match the {} byte panel RAM",
                buffer.len(),
                self.frame_len()
            );
            return Err(DisplayError::OutOfBoundsError);
        }

        log::info!("Writing {} bytes to BW RAM", buffer.len());
        self.reset_ram_counters()?;
        self.interface.cmd(Cmd::WRITE_BW_DATA)?;
        self.interface.data_chunked(buffer)
    }

    fn refresh(&mut self) -> Result<(), DisplayError> {
        log::info!("Refreshing display");
        self.interface
            .cmd_with_data(Cmd::UPDATE_DISPLAY_CTRL2, &[Flag::DISPLAY_UPDATE_FULL])?;
        self.interface.cmd(Cmd::MASTER_ACTIVATE)?;
        self.wait_until_idle();
        Ok(())
    }
}
