//! Data bytes for the UC8151D commands

use crate::uc8151::{HEIGHT, WIDTH};

/// Data bytes sent along with the UC8151D commands.
///
/// All values come from the panel datasheet and the Waveshare reference code.
/// Changing any of them is undefined behaviour on real hardware.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Panel Setting (0x00) flags
    pub const PANEL_SETTING_LUT_FROM_OTP: u8 = 0x0F; // LUT from OTP, 128x296 register layout
    pub const PANEL_SETTING_BOOSTER: u8 = 0x89; // Temperature sensor, boost and timing settings

    // Resolution Setting (0x61): HRES, VRES[8], VRES[7:0]
    pub const RESOLUTION_HRES: u8 = WIDTH as u8;
    pub const RESOLUTION_VRES_HIGH: u8 = (HEIGHT >> 8) as u8;
    pub const RESOLUTION_VRES_LOW: u8 = (HEIGHT & 0xFF) as u8;

    // VCOM and Data Interval Setting (0x50) flags
    pub const VCOM_DATA_INTERVAL_INIT: u8 = 0x87;
    pub const VCOM_DATA_INTERVAL_SLEEP: u8 = 0xF7; // Border floating before power off

    // Deep Sleep (0x07) check code
    pub const DEEP_SLEEP_CHECK_CODE: u8 = 0xA5;

    // Common plane fill patterns
    pub const FILL_WHITE: u8 = 0xFF;
    pub const FILL_INK: u8 = 0x00;
}
