//! Pixel planes and rotation
//!
//! The panel takes two packed planes: black and red. Each byte covers eight
//! horizontally adjacent pixels, most significant bit first, and every row
//! starts on a fresh byte. A set bit leaves the paper white, a cleared bit
//! puts ink (black or red, depending on the plane) on it.

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::uc8151::{error::Error, BYTES_PER_ROW, HEIGHT, PLANE_LEN, WIDTH};

/// Orientation of the drawing coordinates relative to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayRotation {
    /// No rotation, portrait with the connector at the bottom
    #[default]
    Rotate0,
    /// Rotate by 90 degrees clockwise
    Rotate90,
    /// Rotate by 180 degrees clockwise
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

impl DisplayRotation {
    /// Rotation in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            DisplayRotation::Rotate0 => 0,
            DisplayRotation::Rotate90 => 90,
            DisplayRotation::Rotate180 => 180,
            DisplayRotation::Rotate270 => 270,
        }
    }

    const fn is_landscape(self) -> bool {
        matches!(self, DisplayRotation::Rotate90 | DisplayRotation::Rotate270)
    }
}

impl TryFrom<u16> for DisplayRotation {
    type Error = Error;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(DisplayRotation::Rotate0),
            90 => Ok(DisplayRotation::Rotate90),
            180 => Ok(DisplayRotation::Rotate180),
            270 => Ok(DisplayRotation::Rotate270),
            other => Err(Error::UnsupportedRotation(other)),
        }
    }
}

/// Read access to a packed plane, as the driver streams it to the panel
pub trait PixelPlane {
    /// Bytes per physical row
    fn width_bytes(&self) -> usize;
    /// Physical rows
    fn height(&self) -> usize;
    /// Row-major packed bytes, `width_bytes() * height()` of them
    fn raw_bytes(&self) -> &[u8];
}

/// One full-screen plane of the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    buffer: Box<[u8; PLANE_LEN]>,
    rotation: DisplayRotation,
}

impl Default for Plane {
    fn default() -> Self {
        Self::new()
    }
}

impl Plane {
    /// Zeroed plane, unrotated
    pub fn new() -> Self {
        Plane {
            buffer: Box::new([0u8; PLANE_LEN]),
            rotation: DisplayRotation::default(),
        }
    }

    /// Current rotation
    pub fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    /// Change the rotation used for later pixel writes. Existing content stays as it is.
    pub fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.rotation = rotation;
    }

    /// Packed bytes in panel order
    pub fn buffer(&self) -> &[u8; PLANE_LEN] {
        &self.buffer
    }

    /// Mutable packed bytes, for copying in a prepared image
    pub fn buffer_mut(&mut self) -> &mut [u8; PLANE_LEN] {
        &mut self.buffer
    }

    /// Set every byte to `byte`
    pub fn fill(&mut self, byte: u8) {
        self.buffer.fill(byte);
    }

    /// Set (`on`) or clear the bit of the pixel at rotated coordinates `(x, y)`
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        let Some((index, bit)) = self.locate(x, y) else {
            return;
        };
        if on {
            self.buffer[index] |= bit;
        } else {
            self.buffer[index] &= !bit;
        }
    }

    /// Bit of the pixel at rotated coordinates, `None` when out of range
    pub fn pixel(&self, x: i32, y: i32) -> Option<bool> {
        self.locate(x, y)
            .map(|(index, bit)| self.buffer[index] & bit != 0)
    }

    /// Byte index and bit mask of a rotated coordinate
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        let size = self.size();
        if x < 0 || y < 0 || (x as u32) >= size.width || (y as u32) >= size.height {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        let (w, h) = (WIDTH as usize, HEIGHT as usize);

        let (px, py) = match self.rotation {
            DisplayRotation::Rotate0 => (x, y),
            DisplayRotation::Rotate90 => (w - 1 - y, x),
            DisplayRotation::Rotate180 => (w - 1 - x, h - 1 - y),
            DisplayRotation::Rotate270 => (y, h - 1 - x),
        };

        Some((py * BYTES_PER_ROW + px / 8, 0x80 >> (px % 8)))
    }
}

impl PixelPlane for Plane {
    fn width_bytes(&self) -> usize {
        BYTES_PER_ROW
    }

    fn height(&self) -> usize {
        HEIGHT as usize
    }

    fn raw_bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }
}

impl PixelPlane for [u8] {
    fn width_bytes(&self) -> usize {
        BYTES_PER_ROW
    }

    fn height(&self) -> usize {
        self.len() / BYTES_PER_ROW
    }

    fn raw_bytes(&self) -> &[u8] {
        self
    }
}

impl DrawTarget for Plane {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.set_pixel(x, y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

impl OriginDimensions for Plane {
    fn size(&self) -> Size {
        if self.rotation.is_landscape() {
            Size::new(HEIGHT.into(), WIDTH.into())
        } else {
            Size::new(WIDTH.into(), HEIGHT.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

    fn rotated(rotation: DisplayRotation) -> Plane {
        let mut plane = Plane::new();
        plane.set_rotation(rotation);
        plane
    }

    /// Nonzero bytes with their index
    fn set_bits(plane: &Plane) -> Vec<(usize, u8)> {
        plane
            .buffer()
            .iter()
            .enumerate()
            .filter(|(_, byte)| **byte != 0)
            .map(|(i, byte)| (i, *byte))
            .collect()
    }

    #[test]
    fn new_plane_is_zeroed_for_every_rotation() {
        for rotation in [
            DisplayRotation::Rotate0,
            DisplayRotation::Rotate90,
            DisplayRotation::Rotate180,
            DisplayRotation::Rotate270,
        ] {
            let plane = rotated(rotation);
            assert_eq!(plane.buffer().len(), 2756);
            assert!(plane.buffer().iter().all(|b| *b == 0));
        }
    }

    #[test]
    fn rotated_size() {
        assert_eq!(rotated(DisplayRotation::Rotate0).size(), Size::new(104, 212));
        assert_eq!(rotated(DisplayRotation::Rotate90).size(), Size::new(212, 104));
        assert_eq!(rotated(DisplayRotation::Rotate180).size(), Size::new(104, 212));
        assert_eq!(rotated(DisplayRotation::Rotate270).size(), Size::new(212, 104));
    }

    #[test]
    fn origin_maps_to_each_physical_corner() {
        // Rotate0: physical (0, 0)
        let mut plane = rotated(DisplayRotation::Rotate0);
        plane.set_pixel(0, 0, true);
        assert_eq!(set_bits(&plane), vec![(0, 0x80)]);

        // Rotate90: physical (103, 0)
        let mut plane = rotated(DisplayRotation::Rotate90);
        plane.set_pixel(0, 0, true);
        assert_eq!(set_bits(&plane), vec![(12, 0x01)]);

        // Rotate180: physical (103, 211)
        let mut plane = rotated(DisplayRotation::Rotate180);
        plane.set_pixel(0, 0, true);
        assert_eq!(set_bits(&plane), vec![(211 * 13 + 12, 0x01)]);

        // Rotate270: physical (0, 211)
        let mut plane = rotated(DisplayRotation::Rotate270);
        plane.set_pixel(0, 0, true);
        assert_eq!(set_bits(&plane), vec![(211 * 13, 0x80)]);
    }

    #[test]
    fn row_padding_starts_each_row_on_a_byte() {
        let mut plane = Plane::new();
        plane.set_pixel(103, 0, true);
        plane.set_pixel(0, 1, true);
        assert_eq!(set_bits(&plane), vec![(12, 0x01), (13, 0x80)]);
    }

    #[test]
    fn out_of_range_pixels_are_ignored() {
        let mut plane = rotated(DisplayRotation::Rotate90);
        plane.set_pixel(-1, 0, true);
        plane.set_pixel(212, 0, true);
        plane.set_pixel(0, 104, true);
        assert!(set_bits(&plane).is_empty());
        assert_eq!(plane.pixel(212, 0), None);
        assert_eq!(plane.pixel(211, 103), Some(false));
    }

    #[test]
    fn clearing_a_pixel_keeps_its_neighbours() {
        let mut plane = Plane::new();
        plane.fill(0xFF);
        plane.set_pixel(3, 0, false);
        assert_eq!(plane.buffer()[0], 0b1110_1111);
        assert_eq!(plane.pixel(3, 0), Some(false));
        assert_eq!(plane.pixel(4, 0), Some(true));
    }

    #[test]
    fn draws_embedded_graphics_line() {
        let mut plane = Plane::new();
        Line::new(Point::new(0, 0), Point::new(7, 0))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut plane)
            .unwrap();

        assert_eq!(plane.buffer()[0], 0xFF);
        assert_eq!(plane.buffer()[1], 0x00);
    }

    #[test]
    fn draws_ink_on_white_background() {
        let mut plane = rotated(DisplayRotation::Rotate90);
        plane.clear(BinaryColor::On).unwrap();
        Rectangle::new(Point::new(0, 0), Size::new(212, 104))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::Off, 1))
            .draw(&mut plane)
            .unwrap();

        assert_eq!(plane.pixel(0, 0), Some(false));
        assert_eq!(plane.pixel(211, 103), Some(false));
        assert_eq!(plane.pixel(100, 50), Some(true));
    }

    #[test]
    fn clear_fills_whole_plane() {
        let mut plane = Plane::new();
        plane.clear(BinaryColor::On).unwrap();
        assert!(plane.buffer().iter().all(|b| *b == 0xFF));
        plane.clear(BinaryColor::Off).unwrap();
        assert!(plane.buffer().iter().all(|b| *b == 0x00));
    }

    #[test]
    fn rotation_from_degrees() {
        assert_eq!(DisplayRotation::try_from(90).unwrap(), DisplayRotation::Rotate90);
        assert_eq!(DisplayRotation::Rotate270.degrees(), 270);
        assert!(matches!(
            DisplayRotation::try_from(45),
            Err(Error::UnsupportedRotation(45))
        ));
    }

    #[test]
    fn byte_slices_report_their_height() {
        let raw = [0u8; 13 * 4];
        assert_eq!(raw[..].height(), 4);
        assert_eq!(raw[..].width_bytes(), 13);
    }
}
