//! Fixed command tables for power-up and power-down.

use crate::uc8151::{cmd::Cmd, flag::Flag};

/// One command with its data bytes, optionally followed by a busy wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Step {
    pub command: u8,
    pub data: &'static [u8],
    pub wait_idle: bool,
}

impl Step {
    const fn new(command: u8, data: &'static [u8]) -> Self {
        Step {
            command,
            data,
            wait_idle: false,
        }
    }

    const fn then_wait(command: u8) -> Self {
        Step {
            command,
            data: &[],
            wait_idle: true,
        }
    }
}

/// Issued after every hardware reset. Order and values are mandated by the datasheet.
pub(crate) const INIT_SEQUENCE: [Step; 4] = [
    Step::then_wait(Cmd::POWER_ON),
    Step::new(
        Cmd::PANEL_SETTING,
        &[Flag::PANEL_SETTING_LUT_FROM_OTP, Flag::PANEL_SETTING_BOOSTER],
    ),
    Step::new(
        Cmd::RESOLUTION_SETTING,
        &[
            Flag::RESOLUTION_HRES,
            Flag::RESOLUTION_VRES_HIGH,
            Flag::RESOLUTION_VRES_LOW,
        ],
    ),
    Step::new(Cmd::VCOM_AND_DATA_INTERVAL, &[Flag::VCOM_DATA_INTERVAL_INIT]),
];

/// Powers the panel down into deep sleep. Only a hardware reset wakes it again.
pub(crate) const SLEEP_SEQUENCE: [Step; 3] = [
    Step::new(Cmd::VCOM_AND_DATA_INTERVAL, &[Flag::VCOM_DATA_INTERVAL_SLEEP]),
    Step::then_wait(Cmd::POWER_OFF),
    Step::new(Cmd::DEEP_SLEEP, &[Flag::DEEP_SLEEP_CHECK_CODE]),
];

/// Time the panel needs to finish its internal power-down after deep sleep.
/// There is no busy signal for this phase.
pub(crate) const DEEP_SLEEP_SETTLE_MS: u32 = 2000;
