//! Driver for the Waveshare 2.13" (B) V3 black/white/red ePaper panel
//!
//! The panel is driven by a UC8151D controller over a write-only SPI bus with
//! separate chip-select, data/command, reset and busy lines. See [`uc8151`] for
//! the driver itself.
//!
//! ```ignore
//! let mut epd = Epd2in13b::new(spi, cs, busy, dc, rst, delay)?;
//! epd.black_plane_mut().clear(BinaryColor::On)?;
//! Text::new("Hello", Point::new(4, 12), style).draw(epd.black_plane_mut())?;
//! epd.render()?;
//! epd.sleep()?;
//! ```
#![deny(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod uc8151;

pub use crate::uc8151::cmd::Cmd;
pub use crate::uc8151::config::{BusyWait, Config};
pub use crate::uc8151::driver::{Epd2in13b, PanelState};
pub use crate::uc8151::error::{DisplayError, Error, Line};
pub use crate::uc8151::flag::Flag;
pub use crate::uc8151::graphics::{DisplayRotation, PixelPlane, Plane};
pub use crate::uc8151::interface::DisplayInterface;
pub use crate::uc8151::pins::{PinConfig, Pins};
pub use crate::uc8151::{HEIGHT, PLANE_LEN, SPI_FREQUENCY_HZ, SPI_MODE, WIDTH};
