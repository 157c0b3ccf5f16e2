//! Recording `embedded-hal` doubles for the unit tests
//!
//! Every pin change, bus byte, busy read and delay lands in one shared [`Log`],
//! so tests can check the exact order the panel would see.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use embedded_hal::{
    delay::DelayNs,
    digital::{self, InputPin, OutputPin},
    spi::{self, SpiBus},
};

use crate::uc8151::{error::Line, interface::DisplayInterface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Pin(Line, bool),
    Write(u8),
    Flush,
    BusyRead(bool),
    DelayMs(u32),
}

pub(crate) type Log = Rc<RefCell<Vec<Event>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MockError;

impl digital::Error for MockError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

impl spi::Error for MockError {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

pub(crate) struct MockSpi {
    log: Log,
    /// Bytes accepted before every further write fails
    pub fail_after: Option<usize>,
    written: usize,
}

impl spi::ErrorType for MockSpi {
    type Error = MockError;
}

impl SpiBus<u8> for MockSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        for &word in words {
            if self.fail_after.is_some_and(|limit| self.written >= limit) {
                return Err(MockError);
            }
            self.written += 1;
            self.log.borrow_mut().push(Event::Write(word));
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        read.fill(0);
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let outgoing = words.to_vec();
        words.fill(0);
        self.write(&outgoing)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Flush);
        Ok(())
    }
}

pub(crate) struct MockPin {
    line: Line,
    log: Log,
    pub failing: bool,
}

impl digital::ErrorType for MockPin {
    type Error = MockError;
}

impl MockPin {
    fn record(&mut self, high: bool) -> Result<(), MockError> {
        if self.failing {
            return Err(MockError);
        }
        self.log.borrow_mut().push(Event::Pin(self.line, high));
        Ok(())
    }
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record(true)
    }
}

/// Busy line that replays a script of levels, then reports `idle_when_empty`.
pub(crate) struct MockBusy {
    log: Log,
    pub script: VecDeque<bool>,
    pub idle_when_empty: bool,
    pub failing: bool,
}

impl MockBusy {
    fn level(&mut self) -> Result<bool, MockError> {
        if self.failing {
            return Err(MockError);
        }
        let level = self.script.pop_front().unwrap_or(self.idle_when_empty);
        self.log.borrow_mut().push(Event::BusyRead(level));
        Ok(level)
    }
}

impl digital::ErrorType for MockBusy {
    type Error = MockError;
}

impl InputPin for MockBusy {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.level()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.level().map(|level| !level)
    }
}

pub(crate) struct MockDelay {
    log: Log,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ms));
    }
}

pub(crate) type MockInterface =
    DisplayInterface<MockSpi, MockPin, MockBusy, MockPin, MockPin, MockDelay>;

/// Loose set of doubles, so a test can tweak one before building the interface.
pub(crate) struct Hardware {
    pub log: Log,
    pub spi: MockSpi,
    pub cs: MockPin,
    pub busy: MockBusy,
    pub dc: MockPin,
    pub rst: MockPin,
    pub delay: MockDelay,
}

impl Hardware {
    /// Panel that reports idle on every poll
    pub fn new() -> Self {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let pin = |line| MockPin {
            line,
            log: log.clone(),
            failing: false,
        };
        Hardware {
            spi: MockSpi {
                log: log.clone(),
                fail_after: None,
                written: 0,
            },
            cs: pin(Line::ChipSelect),
            busy: MockBusy {
                log: log.clone(),
                script: VecDeque::new(),
                idle_when_empty: true,
                failing: false,
            },
            dc: pin(Line::DataCommand),
            rst: pin(Line::Reset),
            delay: MockDelay { log: log.clone() },
            log,
        }
    }

    /// Queue busy line levels, `false` meaning busy
    pub fn with_busy_script(mut self, levels: &[bool]) -> Self {
        self.busy.script.extend(levels.iter().copied());
        self
    }

    /// Busy line that never releases once the script is exhausted
    pub fn stuck_busy(mut self) -> Self {
        self.busy.idle_when_empty = false;
        self
    }

    pub fn into_interface(self) -> (MockInterface, Log) {
        let interface =
            DisplayInterface::new(self.spi, self.cs, self.busy, self.dc, self.rst, self.delay);
        (interface, self.log)
    }
}

/// A byte as the panel interprets it, decided by the D/C level during the write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transfer {
    Command(u8),
    Data(u8),
}

pub(crate) fn transfers(events: &[Event]) -> Vec<Transfer> {
    let mut data_mode = false;
    let mut out = Vec::new();
    for event in events {
        match *event {
            Event::Pin(Line::DataCommand, level) => data_mode = level,
            Event::Write(byte) if data_mode => out.push(Transfer::Data(byte)),
            Event::Write(byte) => out.push(Transfer::Command(byte)),
            _ => {}
        }
    }
    out
}

pub(crate) fn commands(events: &[Event]) -> Vec<u8> {
    transfers(events)
        .into_iter()
        .filter_map(|t| match t {
            Transfer::Command(byte) => Some(byte),
            Transfer::Data(_) => None,
        })
        .collect()
}

/// Commands with the data bytes that followed each of them
pub(crate) fn command_frames(events: &[Event]) -> Vec<(u8, Vec<u8>)> {
    let mut frames: Vec<(u8, Vec<u8>)> = Vec::new();
    for transfer in transfers(events) {
        match transfer {
            Transfer::Command(byte) => frames.push((byte, Vec::new())),
            Transfer::Data(byte) => {
                if let Some((_, data)) = frames.last_mut() {
                    data.push(byte);
                }
            }
        }
    }
    frames
}

/// Frames with the busy polls (0x71) left out
pub(crate) fn frames_without_polls(events: &[Event]) -> Vec<(u8, Vec<u8>)> {
    command_frames(events)
        .into_iter()
        .filter(|(command, _)| *command != 0x71)
        .collect()
}

pub(crate) fn delays(events: &[Event]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::DelayMs(ms) => Some(*ms),
            _ => None,
        })
        .collect()
}
