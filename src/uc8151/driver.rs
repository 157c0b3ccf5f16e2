//! UC8151D Display Driver Implementation
//!
//! High-level control of the 2.13" black/white/red panel: bring-up, full
//! refreshes from the two pixel planes and deep sleep.
//!
//! ## Panel states
//!
//! ```text
//! Uninitialized --reset()--> Reset --initialize()--> Ready <--> Busy
//!                                                      |
//!                                                   sleep()
//!                                                      v
//!                                                   Asleep
//! ```
//!
//! Every state returns to `Ready` through `wake_up()`. Operations called in the
//! wrong state fail with [`Error::ProtocolViolation`] before anything is sent.
//!
//! ## Refresh
//!
//! A refresh always streams both planes, black (0x10) first and red (0x13)
//! second, then triggers 0x12 and polls the busy line. A full black/red
//! refresh keeps the panel busy for roughly 15 seconds.
//!
//! ## Deep sleep
//!
//! After 0x07 the panel ignores the bus until the next hardware reset, and
//! needs two seconds without a busy signal to power down.

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use crate::uc8151::{
    cmd::Cmd,
    config::Config,
    error::Error,
    graphics::{DisplayRotation, PixelPlane, Plane},
    interface::DisplayInterface,
    sequence::{Step, DEEP_SLEEP_SETTLE_MS, INIT_SEQUENCE, SLEEP_SEQUENCE},
    BYTES_PER_ROW, HEIGHT, PLANE_LEN,
};

/// Where the driver is in the power-up / refresh / sleep cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// Lines claimed, no reset pulse yet
    Uninitialized,
    /// Reset pulse done, init sequence not sent
    Reset,
    /// Powered and configured, accepts plane data and refreshes
    Ready,
    /// Waiting for the busy line
    Busy,
    /// Deep sleep, only a reset wakes the panel
    Asleep,
}

/// Waveshare 2.13" B V3 ePaper driver
///
/// ## Type Parameters
///
/// - `SPI` - SPI bus, mode 0
/// - `CS` - chip-select output pin
/// - `BSY` - BUSY input pin (LOW when display is busy)
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `DELAY` - Delay provider for timing
pub struct Epd2in13b<SPI, CS, BSY, DC, RST, DELAY> {
    interface: DisplayInterface<SPI, CS, BSY, DC, RST, DELAY>,
    black: Plane,
    red: Plane,
    config: Config,
    state: PanelState,
}

impl<SPI, CS, BSY, DC, RST, DELAY> Epd2in13b<SPI, CS, BSY, DC, RST, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Create and initialize the display driver with default settings
    pub fn new(spi: SPI, cs: CS, busy: BSY, dc: DC, rst: RST, delay: DELAY) -> Result<Self, Error> {
        let interface = DisplayInterface::new(spi, cs, busy, dc, rst, delay);
        Self::open(interface, DisplayRotation::default(), Config::default())
    }

    /// Claim the lines, reset and initialize the panel
    ///
    /// Both planes start zeroed and rotated by `rotation`.
    pub fn open(
        mut interface: DisplayInterface<SPI, CS, BSY, DC, RST, DELAY>,
        rotation: DisplayRotation,
        config: Config,
    ) -> Result<Self, Error> {
        log::info!("Opening ePaper panel, rotation {}°", rotation.degrees());
        interface.claim()?;

        let mut epd = Epd2in13b {
            interface,
            black: Plane::new(),
            red: Plane::new(),
            config,
            state: PanelState::Uninitialized,
        };
        epd.set_rotation(rotation);
        epd.reset()?;
        epd.initialize()?;
        Ok(epd)
    }

    /// Hardware reset. Allowed in every state.
    pub fn reset(&mut self) -> Result<(), Error> {
        log::info!("Resetting panel");
        self.interface.reset()?;
        self.state = PanelState::Reset;
        Ok(())
    }

    /// Power on and configure the panel. Needs a fresh reset.
    pub fn initialize(&mut self) -> Result<(), Error> {
        self.require(PanelState::Reset, "initialize")?;
        log::info!("Initializing panel");
        self.run_sequence(&INIT_SEQUENCE)?;
        self.state = PanelState::Ready;
        log::info!("Panel ready");
        Ok(())
    }

    /// Poll the busy line until the panel is idle, returning the number of polls
    ///
    /// The state reads `Busy` while polling. On timeout it stays `Busy` and only
    /// [`Self::wake_up`] gets the panel going again.
    pub fn wait_until_idle(&mut self) -> Result<u32, Error> {
        let previous = self.state;
        self.state = PanelState::Busy;
        let polls = self.interface.wait_until_idle(&self.config)?;
        self.state = previous;
        Ok(polls)
    }

    /// Send a raw command byte, whatever the state
    pub fn send_command(&mut self, command: u8) -> Result<(), Error> {
        self.interface.cmd(command)
    }

    /// Send a raw data byte, whatever the state
    pub fn send_data(&mut self, data: u8) -> Result<(), Error> {
        self.interface.data(data)
    }

    /// Fill the panel with constant plane bytes and refresh
    ///
    /// The in-memory planes are not touched. `clear(0xFF, 0xFF)` gives a white panel.
    pub fn clear(&mut self, black: u8, red: u8) -> Result<(), Error> {
        self.require(PanelState::Ready, "clear")?;
        log::info!("Clearing panel (black 0x{:02X}, red 0x{:02X})", black, red);

        self.interface.cmd(Cmd::WRITE_BLACK_DATA)?;
        self.interface.data_x_times(black, PLANE_LEN)?;
        self.interface.cmd(Cmd::WRITE_RED_DATA)?;
        self.interface.data_x_times(red, PLANE_LEN)?;

        self.turn_on_display()
    }

    /// Refresh the panel from its RAM and wait for it to finish
    pub fn turn_on_display(&mut self) -> Result<(), Error> {
        self.require(PanelState::Ready, "turn_on_display")?;
        self.interface.cmd(Cmd::DISPLAY_REFRESH)?;
        let polls = self.wait_until_idle()?;
        log::info!("Display refresh complete after {} polls", polls);
        Ok(())
    }

    /// Stream both owned planes to the panel and refresh
    pub fn render(&mut self) -> Result<(), Error> {
        self.require(PanelState::Ready, "render")?;
        log::info!("Rendering planes");
        Self::transmit(&mut self.interface, self.black.raw_bytes(), self.red.raw_bytes())?;
        self.turn_on_display()
    }

    /// Stream two external planes to the panel and refresh
    ///
    /// Both must have the panel's physical layout, 13 bytes by 212 rows.
    pub fn render_planes<B, R>(&mut self, black: &B, red: &R) -> Result<(), Error>
    where
        B: PixelPlane + ?Sized,
        R: PixelPlane + ?Sized,
    {
        self.require(PanelState::Ready, "render_planes")?;
        check_plane(black)?;
        check_plane(red)?;
        log::info!("Rendering external planes");
        Self::transmit(&mut self.interface, black.raw_bytes(), red.raw_bytes())?;
        self.turn_on_display()
    }

    /// Put the panel into deep sleep
    pub fn sleep(&mut self) -> Result<(), Error> {
        self.require(PanelState::Ready, "sleep")?;
        log::info!("Entering deep sleep");
        self.run_sequence(&SLEEP_SEQUENCE)?;
        self.interface.delay.delay_ms(DEEP_SLEEP_SETTLE_MS);
        self.state = PanelState::Asleep;
        Ok(())
    }

    /// Reset and initialize again, from any state
    pub fn wake_up(&mut self) -> Result<(), Error> {
        log::info!("Waking panel from {:?}", self.state);
        self.reset()?;
        self.initialize()
    }

    /// Single read of the busy line
    pub fn is_busy(&mut self) -> Result<bool, Error> {
        self.interface.is_busy()
    }

    fn run_sequence(&mut self, steps: &[Step]) -> Result<(), Error> {
        for step in steps {
            self.interface.cmd_with_data(step.command, step.data)?;
            if step.wait_idle {
                self.wait_until_idle()?;
            }
        }
        Ok(())
    }

    // A failed black stream returns before the red command goes out.
    fn transmit(
        interface: &mut DisplayInterface<SPI, CS, BSY, DC, RST, DELAY>,
        black: &[u8],
        red: &[u8],
    ) -> Result<(), Error> {
        interface.cmd(Cmd::WRITE_BLACK_DATA)?;
        interface.data_stream(black)?;
        log::debug!("Sent {} bytes of black plane", black.len());
        interface.cmd(Cmd::WRITE_RED_DATA)?;
        interface.data_stream(red)?;
        log::debug!("Sent {} bytes of red plane", red.len());
        Ok(())
    }
}

impl<SPI, CS, BSY, DC, RST, DELAY> Epd2in13b<SPI, CS, BSY, DC, RST, DELAY> {
    /// Current panel state
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Black plane, cleared bits are black
    pub fn black_plane(&self) -> &Plane {
        &self.black
    }

    /// Red plane, cleared bits are red
    pub fn red_plane(&self) -> &Plane {
        &self.red
    }

    /// Black plane for drawing
    pub fn black_plane_mut(&mut self) -> &mut Plane {
        &mut self.black
    }

    /// Red plane for drawing
    pub fn red_plane_mut(&mut self) -> &mut Plane {
        &mut self.red
    }

    /// Both planes for drawing at once, black first
    pub fn planes_mut(&mut self) -> (&mut Plane, &mut Plane) {
        (&mut self.black, &mut self.red)
    }

    /// Rotation of both planes
    pub fn rotation(&self) -> DisplayRotation {
        self.black.rotation()
    }

    /// Rotate both planes. Pixels already drawn keep their physical position.
    pub fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.black.set_rotation(rotation);
        self.red.set_rotation(rotation);
    }

    /// Give the bus, pins and delay back
    pub fn release(self) -> (SPI, CS, BSY, DC, RST, DELAY) {
        self.interface.release()
    }

    fn require(&self, expected: PanelState, operation: &'static str) -> Result<(), Error> {
        if self.state == expected {
            return Ok(());
        }
        log::warn!("Rejected {} while panel is {:?}", operation, self.state);
        Err(Error::ProtocolViolation {
            operation,
            state: self.state,
        })
    }
}

fn check_plane<P: PixelPlane + ?Sized>(plane: &P) -> Result<(), Error> {
    let actual = plane.raw_bytes().len();
    if plane.width_bytes() != BYTES_PER_ROW
        || plane.height() != HEIGHT as usize
        || actual != PLANE_LEN
    {
        return Err(Error::PlaneSize {
            expected: PLANE_LEN,
            actual,
        });
    }
    Ok(())
}
