//! Display interface using SPI
use display_interface::DisplayError;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

const RESET_DELAY_MS: u32 = 20;
const BUSY_WAIT_TIMEOUT_MS: u32 = 5000; // 5 seconds timeout
const BUSY_POLL_INTERVAL_MS: u32 = 1;

/// Bytes per SPI write when streaming the frame
const CHUNK_SIZE: usize = 32;

/// SPI bus plus the control pins of the controller
///
pub struct DisplayInterface<SPI, BSY, DC, RST> {
    /// SPI device
    spi: SPI,
    /// High for busy, wait until display is ready!
    busy: BSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: RST,
}

impl<SPI, BSY, DC, RST> DisplayInterface<SPI, BSY, DC, RST> {
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST) -> Self {
        DisplayInterface { spi, busy, dc, rst }
    }

    /// Give the bus and pins back
    pub fn release(self) -> (SPI, BSY, DC, RST) {
        (self.spi, self.busy, self.dc, self.rst)
    }
}

impl<SPI, BSY, DC, RST> DisplayInterface<SPI, BSY, DC, RST>
where
    SPI: SpiDevice,
    RST: OutputPin,
    DC: OutputPin,
    BSY: InputPin,
{
    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        match self.spi.write(&[command]) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("SPI write error for command 0x{:02X}: {:?}", command, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.spi
            .write(data)
            .map_err(|_| DisplayError::BusWriteError)
    }

    /// Basic function for sending a command and the data belonging to it.
    pub(crate) fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        self.data(data)
    }

    /// Send a large block of data in chunks to keep single transfers short
    pub(crate) fn data_chunked(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;

        let chunks = data.len().div_ceil(CHUNK_SIZE);
        // Log ~10 times during transfer
        let log_interval = (chunks / 10).max(1);

        for (i, chunk) in data.chunks(CHUNK_SIZE).enumerate() {
            if i % log_interval == 0 && chunks > 10 {
                log::debug!("Progress: {}/{} chunks", i, chunks);
            }
            self.spi
                .write(chunk)
                .map_err(|_| DisplayError::BusWriteError)?;
        }

        log::debug!("Completed sending {} bytes of data", data.len());
        Ok(())
    }

    /// Wait for the busy pin to go LOW, polling every millisecond
    ///
    /// Returns false when the pin is still high after the timeout.
    pub(crate) fn wait_busy_low(&mut self, delay: &mut impl DelayNs) -> bool {
        let mut waited_ms = 0;

        while waited_ms < BUSY_WAIT_TIMEOUT_MS {
            match self.busy.is_high() {
                Ok(false) => return true,
                Ok(true) => {
                    delay.delay_ms(BUSY_POLL_INTERVAL_MS);
                    waited_ms += BUSY_POLL_INTERVAL_MS;
                }
                Err(_) => {
                    // Error reading pin - bail out to avoid infinite loop
                    log::error!("Error reading BUSY pin state - assuming not busy to continue");
                    return true;
                }
            }
        }

        log::error!(
            "TIMEOUT waiting for BUSY pin to go LOW after {} ms",
            BUSY_WAIT_TIMEOUT_MS
        );
        false
    }

    /// Hardware reset: high, low pulse, high
    pub(crate) fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(RESET_DELAY_MS);
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(2);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }
}
