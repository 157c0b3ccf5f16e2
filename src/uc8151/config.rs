//! Runtime settings of the driver

/// Default upper bound for a single busy wait. A full black/red refresh takes about 15 s.
pub const BUSY_WAIT_TIMEOUT_MS: u32 = 30_000;

/// Delay between two busy polls
pub const BUSY_POLL_INTERVAL_MS: u32 = 10;

/// How long the driver keeps polling the busy line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyWait {
    /// Give up with [`crate::uc8151::error::Error::PanelTimeout`] after `timeout_ms`
    Bounded {
        /// Accumulated poll delay after which the wait fails
        timeout_ms: u32,
    },
    /// Poll forever. A stuck busy line hangs the caller.
    Unbounded,
}

impl Default for BusyWait {
    fn default() -> Self {
        BusyWait::Bounded {
            timeout_ms: BUSY_WAIT_TIMEOUT_MS,
        }
    }
}

/// Driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Busy wait policy
    pub busy_wait: BusyWait,
    /// Milliseconds slept between two status polls, zero counts as 1
    pub poll_interval_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Bounded busy wait with the default timeout and poll interval
    pub const fn new() -> Self {
        Self {
            busy_wait: BusyWait::Bounded {
                timeout_ms: BUSY_WAIT_TIMEOUT_MS,
            },
            poll_interval_ms: BUSY_POLL_INTERVAL_MS,
        }
    }

    /// Set the busy wait policy
    pub const fn with_busy_wait(mut self, busy_wait: BusyWait) -> Self {
        self.busy_wait = busy_wait;
        self
    }

    /// Bound busy waits to `timeout_ms`
    pub const fn with_timeout_ms(self, timeout_ms: u32) -> Self {
        self.with_busy_wait(BusyWait::Bounded { timeout_ms })
    }

    /// Poll the busy line forever, like the Waveshare reference code
    pub const fn unbounded(self) -> Self {
        self.with_busy_wait(BusyWait::Unbounded)
    }

    /// Set the delay between polls. Zero is raised to 1 ms so a bounded wait always ends.
    pub const fn with_poll_interval_ms(mut self, poll_interval_ms: u32) -> Self {
        self.poll_interval_ms = if poll_interval_ms == 0 {
            1
        } else {
            poll_interval_ms
        };
        self
    }
}
