//! Shared types used across the beacon firmware
//!
//! This module defines the time and status types that flow between the
//! cooperative main context and the keying interrupt.

use core::fmt;

/// Monotonic millisecond timestamp or duration
///
/// Wraps like an Arduino-style `millis()` counter. Elapsed time is always
/// computed with wrapping subtraction so a counter rollover does not stall
/// the scheduler.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Millis(u32);

impl Millis {
    /// Zero milliseconds
    pub const ZERO: Self = Self(0);

    /// Create from a raw millisecond count
    #[must_use]
    pub const fn new(ms: u32) -> Self {
        Self(ms)
    }

    /// Get the raw millisecond count
    #[must_use]
    pub const fn as_ms(self) -> u32 {
        self.0
    }

    /// Time elapsed since an earlier timestamp, tolerant of counter wrap
    #[must_use]
    pub const fn elapsed_since(self, earlier: Self) -> Self {
        Self(self.0.wrapping_sub(earlier.0))
    }
}

impl fmt::Debug for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ms", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Millis {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} ms", self.0);
    }
}

/// Status of a transmit-path operation that did not produce a value
///
/// Only [`TxError::Fault`] is an error in the strict sense. The other
/// variants are flow control: the caller holds the line or retries later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxError {
    /// Payload buffer drained, no byte available
    Finished,
    /// Previous message is still being transmitted
    Busy,
    /// Payload provider or output line failure
    Fault,
}

impl TxError {
    /// Check if this status is a genuine failure
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Fault)
    }
}

impl fmt::Display for TxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finished => f.write_str("finished"),
            Self::Busy => f.write_str("busy"),
            Self::Fault => f.write_str("fault"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TxError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Finished => defmt::write!(f, "FINISHED"),
            Self::Busy => defmt::write!(f, "BUSY"),
            Self::Fault => defmt::write!(f, "FAULT"),
        }
    }
}

/// Transmit-path operation result
pub type TxResult<T> = Result<T, TxError>;
