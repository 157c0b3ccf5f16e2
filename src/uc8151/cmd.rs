//! Command bytes of the UC8151D controller

/// Command bytes of the UC8151D controller used by this panel.
pub struct Cmd;
#[allow(missing_docs)]
impl Cmd {
    // Init
    pub const PANEL_SETTING: u8 = 0x00;
    pub const POWER_ON: u8 = 0x04;
    pub const RESOLUTION_SETTING: u8 = 0x61;
    pub const VCOM_AND_DATA_INTERVAL: u8 = 0x50;

    // Update
    pub const WRITE_BLACK_DATA: u8 = 0x10;
    pub const WRITE_RED_DATA: u8 = 0x13;
    pub const DISPLAY_REFRESH: u8 = 0x12;
    pub const GET_STATUS: u8 = 0x71;

    // Power down
    pub const POWER_OFF: u8 = 0x02;
    pub const DEEP_SLEEP: u8 = 0x07;
}

/*
Waveshare Pico example code had these:
0x04 - Power On
0x00 - Panel Setting
0x61 - Resolution Setting
0x50 - VCOM and Data Interval Setting
0x10 - Data Start Transmission 1 (black)
0x13 - Data Start Transmission 2 (red)
0x12 - Display Refresh
0x71 - Get Status
0x02 - Power Off
0x07 - Deep Sleep
*/
