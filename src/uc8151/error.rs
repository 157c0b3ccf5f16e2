//! Errors reported by the driver

pub use display_interface::DisplayError;

use crate::uc8151::driver::PanelState;

/// Hardware lines the driver owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// SPI bus
    Bus,
    /// Chip-select output
    ChipSelect,
    /// Data/command select output
    DataCommand,
    /// Reset output
    Reset,
    /// Busy input
    Busy,
}

/// Driver error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A bus or pin could not be claimed or read
    #[error("hardware line {0:?} is unavailable")]
    HardwareUnavailable(Line),

    /// Writing to the panel failed
    #[error("transport error: {0:?}")]
    Transport(DisplayError),

    /// The busy line did not release in time
    #[error("panel still busy after {waited_ms} ms")]
    PanelTimeout {
        /// Accumulated poll delay
        waited_ms: u32,
    },

    /// An operation was called in a state where the panel cannot accept it
    #[error("{operation} is not allowed while the panel is {state:?}")]
    ProtocolViolation {
        /// Rejected operation
        operation: &'static str,
        /// Driver state at the time of the call
        state: PanelState,
    },

    /// A pixel plane does not have the panel's dimensions
    #[error("pixel plane has {actual} bytes, expected {expected}")]
    PlaneSize {
        /// Required length in bytes
        expected: usize,
        /// Length of the given plane
        actual: usize,
    },

    /// Rotation is not one of 0, 90, 180 or 270 degrees
    #[error("unsupported rotation of {0} degrees")]
    UnsupportedRotation(u16),

    /// One GPIO was assigned to two lines
    #[error("GPIO {gpio} is assigned to more than one line")]
    PinConflict {
        /// The doubly assigned GPIO
        gpio: u8,
    },
}

impl From<DisplayError> for Error {
    fn from(error: DisplayError) -> Self {
        Error::Transport(error)
    }
}
