/// Flag values sent as data after an SSD1680 command
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Driver Output Control (0x01) flags
    pub const DRIVER_OUTPUT_GATE_SCAN_FROM_G0: u8 = 0x00;

    // Data Entry Mode (0x11) flags
    pub const DATA_ENTRY_INCRY_INCRX: u8 = 0x03; // Y increment, X increment

    // Deep Sleep Mode (0x10) flags
    pub const DEEP_SLEEP_MODE_1: u8 = 0x01; // Enter deep sleep mode

    // Temperature Sensor Control (0x18) flags
    pub const INTERNAL_TEMP_SENSOR: u8 = 0x80;

    // Display Update Control 2 (0x22), full update sequence
    pub const DISPLAY_UPDATE_FULL: u8 = 0xF4;

    // Border Waveform Control (0x3C) flags
    pub const BORDER_WAVEFORM_FOLLOW_LUT: u8 = 0x04;
    pub const BORDER_WAVEFORM_LUT1: u8 = 0x01;
}
