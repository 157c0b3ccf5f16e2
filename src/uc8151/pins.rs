//! Pin definitions for the e-paper display
//!
//! [`Pins`] holds the wiring of the Pico-ePaper-2.13-B header. Boards wired differently
//! pass their own [`PinConfig`] to the platform layer instead.

use crate::uc8151::error::Error;

/// Pin configuration constants for the Pico-ePaper-2.13-B header
pub struct Pins;

impl Pins {
    /// Reset pin for display
    pub const RST: u8 = 12;
    /// Data/Command control pin (High for data, Low for command)
    pub const DC: u8 = 8;
    /// Chip Select pin for SPI display
    pub const CS: u8 = 9;
    /// Busy status pin (Low when display is busy)
    pub const BSY: u8 = 13;
    /// SPI Clock pin
    pub const SCK: u8 = 10;
    /// SPI Master Out Slave In
    pub const MOSI: u8 = 11;
}

/// GPIO numbers of every line the panel needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinConfig {
    /// Reset output
    pub reset: u8,
    /// Data/command select output
    pub dc: u8,
    /// Chip-select output
    pub cs: u8,
    /// Busy input
    pub busy: u8,
    /// SPI clock
    pub clock: u8,
    /// SPI data out
    pub data: u8,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            reset: Pins::RST,
            dc: Pins::DC,
            cs: Pins::CS,
            busy: Pins::BSY,
            clock: Pins::SCK,
            data: Pins::MOSI,
        }
    }
}

impl PinConfig {
    /// All assigned GPIOs in field order
    pub const fn as_array(&self) -> [u8; 6] {
        [
            self.reset, self.dc, self.cs, self.busy, self.clock, self.data,
        ]
    }

    /// Rejects a wiring that gives one GPIO two roles
    pub fn validate(&self) -> Result<(), Error> {
        let gpios = self.as_array();
        for (i, gpio) in gpios.iter().enumerate() {
            if gpios[i + 1..].contains(gpio) {
                return Err(Error::PinConflict { gpio: *gpio });
            }
        }
        Ok(())
    }
}
