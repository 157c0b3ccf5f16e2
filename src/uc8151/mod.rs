//! UC8151D ePaper Display Driver
//!
//! Used in the [Waveshare 2.13" (B) black/red display](https://www.waveshare.com/pico-epaper-2.13-b.htm)
//! (104 x 212 pixels, version 3 of the panel).
//!
//! This driver is losely modeled after the
//! [epd-waveshare](https://github.com/caemor/epd-waveshare) drivers but built for one panel only.
//!
//! ### Usage
//! The driver owns one buffer per color. To display something you:
//!
//! 1. open the driver with [`driver::Epd2in13b::open`], which resets and initializes the panel
//! 1. draw onto [`driver::Epd2in13b::black_plane_mut`] and [`driver::Epd2in13b::red_plane_mut`],
//!    preferably with [`embedded_graphics`](https://github.com/jamwaffles/embedded-graphics)
//! 1. flush both planes with [`driver::Epd2in13b::render`]
//! 1. power down with [`driver::Epd2in13b::sleep`]
//!
//! Both planes use one bit per pixel: a set bit is paper (white), a cleared bit is ink.

use embedded_hal::spi::{Mode, MODE_0};

pub mod cmd;
pub mod config;
pub mod driver;
pub mod error;
pub mod flag;
pub mod graphics;
pub mod interface;
pub mod pins;
pub(crate) mod sequence;

#[cfg(test)]
pub(crate) mod mock;

/// Display width, pixels horizontally
pub const WIDTH: u16 = 104;

/// Display height, pixels vertically
pub const HEIGHT: u16 = 212;

/// Bytes needed for one row of a plane
pub const BYTES_PER_ROW: usize = (WIDTH as usize).div_ceil(8);

/// Length in bytes of one full plane
pub const PLANE_LEN: usize = buffer_len(WIDTH as usize, HEIGHT as usize);

/// SPI mode the panel expects (CPOL = 0, CPHA = 0), MSB first
pub const SPI_MODE: Mode = MODE_0;

/// SPI clock the reference board runs the panel at
pub const SPI_FREQUENCY_HZ: u32 = 40_000_000;

/// Computes the needed buffer length. Rounds up in case width
/// is not divisible by 8, padding the end of each row.
///
/// ```text
///             width         unused
///                           bits
/// <------------------------><---->
/// [76543210][76543210]...[765XXXXX] ^
/// [76543210][76543210]...[765XXXXX] | height
/// [76543210][76543210]...[765XXXXX] v
/// ```
pub const fn buffer_len(width: usize, height: usize) -> usize {
    width.div_ceil(8) * height
}
