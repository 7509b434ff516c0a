//! DRDY handshake.
//!
//! [`ReadySync`] is a small state machine fed one pin observation at a time.
//! The driver owns the loop and the delay between polls, so tests can script
//! the observations without touching a clock.

/// What to do when reading the DRDY pin itself fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinErrorPolicy {
    /// Return the pin error to the caller.
    Propagate,
    /// Settle as if DRDY had been seen ready. Legacy behavior: a broken pin
    /// makes every wait succeed immediately.
    TreatAsReady,
}

/// Readiness polling configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadyConfig {
    /// Not-ready observations tolerated before giving up.
    pub max_polls: u32,
    /// Delay between polls; 0 busy-waits.
    pub poll_interval_ns: u32,
    pub on_pin_error: PinErrorPolicy,
}

impl Default for ReadyConfig {
    fn default() -> Self {
        ReadyConfig {
            max_polls: 400_000,
            poll_interval_ns: 0,
            on_pin_error: PinErrorPolicy::Propagate,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadyState {
    Polling { polls: u32 },
    Settled { polls: u32 },
    /// Gave up after `polls` not-ready observations.
    TimedOut { polls: u32 },
}

/// Result of feeding one observation
#[derive(Debug, PartialEq, Eq)]
pub enum Poll<E> {
    Pending,
    /// Settled after this many not-ready observations.
    Ready(u32),
    Timeout,
    Failed(E),
}

#[derive(Clone, Copy, Debug)]
pub struct ReadySync {
    config: ReadyConfig,
    state: ReadyState,
}

impl ReadySync {
    pub fn new(config: ReadyConfig) -> Self {
        ReadySync {
            config,
            state: ReadyState::Polling { polls: 0 },
        }
    }

    pub fn state(&self) -> ReadyState {
        self.state
    }

    /// Advances the machine with one DRDY reading, `Ok(true)` meaning the
    /// line is at its ready level.
    pub fn observe<E>(&mut self, reading: Result<bool, E>) -> Poll<E> {
        let polls = match self.state {
            ReadyState::Settled { polls } => return Poll::Ready(polls),
            ReadyState::TimedOut { .. } => return Poll::Timeout,
            ReadyState::Polling { polls } => polls,
        };

        match reading {
            Ok(true) => self.settle(polls),
            Ok(false) => {
                // Below max_polls here (or both 0), so no overflow.
                let polls = polls + 1;
                if polls >= self.config.max_polls {
                    self.state = ReadyState::TimedOut { polls };
                    Poll::Timeout
                } else {
                    self.state = ReadyState::Polling { polls };
                    Poll::Pending
                }
            }
            Err(e) => match self.config.on_pin_error {
                PinErrorPolicy::Propagate => Poll::Failed(e),
                PinErrorPolicy::TreatAsReady => {
                    log::warn!("DRDY read failed, treating as ready");
                    self.settle(polls)
                }
            },
        }
    }

    fn settle<E>(&mut self, polls: u32) -> Poll<E> {
        self.state = ReadyState::Settled { polls };
        Poll::Ready(polls)
    }
}
