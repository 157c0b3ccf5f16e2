//! Display interface using SPI
use crate::uc8151::{
    cmd::Cmd,
    config::{BusyWait, Config},
    error::{DisplayError, Error, Line},
};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

/// Reset line timeline: high, low, high again
const RESET_HIGH_MS: u32 = 50;
const RESET_LOW_MS: u32 = 2;

/// The connection between the MCU and the panel
///
/// Owns the SPI bus, the four control lines and the delay provider.
pub struct DisplayInterface<SPI, CS, BSY, DC, RST, DELAY> {
    /// SPI bus, mode 0
    spi: SPI,
    /// Chip select, low while a byte is on the bus
    cs: CS,
    /// Low while the panel is busy, high when it can take the next command
    busy: BSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: RST,
    /// Delay provider for the reset timeline and busy polling
    pub(crate) delay: DELAY,
}

impl<SPI, CS, BSY, DC, RST, DELAY> DisplayInterface<SPI, CS, BSY, DC, RST, DELAY> {
    /// Take ownership of the bus, the pins and the delay
    pub fn new(spi: SPI, cs: CS, busy: BSY, dc: DC, rst: RST, delay: DELAY) -> Self {
        DisplayInterface {
            spi,
            cs,
            busy,
            dc,
            rst,
            delay,
        }
    }

    /// Hand the hardware back
    pub fn release(self) -> (SPI, CS, BSY, DC, RST, DELAY) {
        (self.spi, self.cs, self.busy, self.dc, self.rst, self.delay)
    }
}

impl<SPI, CS, BSY, DC, RST, DELAY> DisplayInterface<SPI, CS, BSY, DC, RST, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Put every line into its idle level and read the busy line once
    pub(crate) fn claim(&mut self) -> Result<(), Error> {
        self.cs
            .set_high()
            .map_err(|_| Error::HardwareUnavailable(Line::ChipSelect))?;
        self.dc
            .set_low()
            .map_err(|_| Error::HardwareUnavailable(Line::DataCommand))?;
        self.rst
            .set_high()
            .map_err(|_| Error::HardwareUnavailable(Line::Reset))?;
        let idle = self
            .busy
            .is_high()
            .map_err(|_| Error::HardwareUnavailable(Line::Busy))?;
        log::debug!("Lines claimed, busy line reads {}", if idle { "idle" } else { "busy" });
        Ok(())
    }

    /// Hardware reset: high 50 ms, low 2 ms, high 50 ms
    pub(crate) fn reset(&mut self) -> Result<(), Error> {
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_HIGH_MS);
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_LOW_MS);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_HIGH_MS);
        Ok(())
    }

    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), Error> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        self.write_byte(command).inspect_err(|_| {
            log::error!("SPI write error for command 0x{:02X}", command);
        })
    }

    /// Basic function for sending one byte of data
    pub(crate) fn data(&mut self, byte: u8) -> Result<(), Error> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.write_byte(byte)
    }

    /// Basic function for sending a command and the data belonging to it.
    pub(crate) fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), Error> {
        self.cmd(command)?;
        self.data_stream(data)
    }

    /// Send every byte of `data` in order, one transfer per byte
    pub(crate) fn data_stream(&mut self, data: &[u8]) -> Result<(), Error> {
        for &byte in data {
            self.data(byte)?;
        }
        Ok(())
    }

    /// Basic function for sending the same byte of data multiple times
    /// Used for setting one color for the whole frame
    pub(crate) fn data_x_times(&mut self, val: u8, repetitions: usize) -> Result<(), Error> {
        for _ in 0..repetitions {
            self.data(val)?;
        }
        log::debug!("Completed sending {} bytes of 0x{:02X}", repetitions, val);
        Ok(())
    }

    /// One framed bus transaction. Chip select is released on every path.
    fn write_byte(&mut self, byte: u8) -> Result<(), Error> {
        self.cs.set_low().map_err(|_| DisplayError::CSError)?;
        let written = self.spi.write(&[byte]).and_then(|()| self.spi.flush());
        let released = self.cs.set_high();

        written.map_err(|_| DisplayError::BusWriteError)?;
        released.map_err(|_| DisplayError::CSError)?;
        Ok(())
    }

    /// Poll the panel until the busy line reads high
    ///
    /// Every iteration, the first included, sends one status query (0x71) before reading
    /// the line. Returns the number of polls.
    pub(crate) fn wait_until_idle(&mut self, config: &Config) -> Result<u32, Error> {
        let mut polls: u32 = 0;
        let mut waited_ms: u32 = 0;
        // zero would never advance waited_ms
        let interval_ms = config.poll_interval_ms.max(1);

        loop {
            self.cmd(Cmd::GET_STATUS)?;
            polls = polls.saturating_add(1);

            let idle = self
                .busy
                .is_high()
                .map_err(|_| Error::HardwareUnavailable(Line::Busy))?;
            if idle {
                log::debug!("Panel idle after {} polls ({} ms)", polls, waited_ms);
                return Ok(polls);
            }

            if let BusyWait::Bounded { timeout_ms } = config.busy_wait {
                if waited_ms >= timeout_ms {
                    log::error!(
                        "TIMEOUT waiting for BUSY pin to go HIGH after {} polls",
                        polls
                    );
                    return Err(Error::PanelTimeout { waited_ms });
                }
            }

            self.delay.delay_ms(interval_ms);
            waited_ms = waited_ms.saturating_add(interval_ms);
        }
    }

    /// Single read of the busy line
    pub(crate) fn is_busy(&mut self) -> Result<bool, Error> {
        self.busy
            .is_low()
            .map_err(|_| Error::HardwareUnavailable(Line::Busy))
    }
}
