//! Keying Tick Driver
//!
//! Glue between the periodic keying interrupt and the output line. Each
//! tick asks the framer for one bit and drives the transmitter data pin.
//! When the framer has nothing to send the line is left alone (or parked
//! at mark, if configured), never glitched.

use embedded_hal::digital::OutputPin;

use crate::framer::{FrameFormat, RttyFramer};
use crate::payload::ByteSource;
use crate::types::{TxError, TxResult};

/// Line behaviour while no character is being sent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum IdleLevel {
    /// Leave the line at whatever level the last bit set
    #[default]
    Hold,
    /// Park the line high (mark)
    Mark,
}

#[cfg(feature = "embedded")]
impl defmt::Format for IdleLevel {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Hold => defmt::write!(f, "HOLD"),
            Self::Mark => defmt::write!(f, "MARK"),
        }
    }
}

/// Framer plus output pin, driven once per baud period
pub struct TickDriver<S, P> {
    framer: RttyFramer<S>,
    pin: P,
    idle: IdleLevel,
    /// Last level written to the pin
    level: Option<bool>,
}

impl<S: ByteSource, P: OutputPin> TickDriver<S, P> {
    /// Create a driver with the default frame format and held idle line
    pub fn new(source: S, pin: P) -> Self {
        Self::with_format(source, pin, FrameFormat::default())
    }

    /// Create a driver with an explicit frame format
    pub fn with_format(source: S, pin: P, format: FrameFormat) -> Self {
        Self {
            framer: RttyFramer::with_format(source, format),
            pin,
            idle: IdleLevel::default(),
            level: None,
        }
    }

    /// Set the idle line behaviour
    #[must_use]
    pub fn with_idle(mut self, idle: IdleLevel) -> Self {
        self.idle = idle;
        self
    }

    /// Advance one baud period
    ///
    /// Returns the bit written, or the framer's status when nothing was
    /// sent. A pin failure is reported as [`TxError::Fault`].
    pub fn on_tick(&mut self) -> TxResult<bool> {
        match self.framer.next_bit() {
            Ok(bit) => {
                self.drive(bit)?;
                Ok(bit)
            }
            Err(TxError::Finished) => {
                if self.idle == IdleLevel::Mark && self.level != Some(true) {
                    self.drive(true)?;
                }
                Err(TxError::Finished)
            }
            Err(err) => Err(err),
        }
    }

    fn drive(&mut self, bit: bool) -> TxResult<()> {
        let result = if bit {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| TxError::Fault)?;
        self.level = Some(bit);
        Ok(())
    }

    /// Last level written to the line, if any
    #[must_use]
    pub const fn level(&self) -> Option<bool> {
        self.level
    }

    /// Check if the framer is between characters
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.framer.is_idle()
    }

    /// Borrow the framer
    pub fn framer(&self) -> &RttyFramer<S> {
        &self.framer
    }

    /// Borrow the output pin
    pub fn pin(&self) -> &P {
        &self.pin
    }

    /// Release the framer and the pin
    pub fn release(self) -> (RttyFramer<S>, P) {
        (self.framer, self.pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::PayloadBuffer;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    #[derive(Default)]
    struct RecordingPin {
        writes: std::vec::Vec<bool>,
    }

    impl ErrorType for RecordingPin {
        type Error = Infallible;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.writes.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.writes.push(true);
            Ok(())
        }
    }

    #[test]
    fn holds_line_when_drained() {
        let buf: PayloadBuffer<4> = PayloadBuffer::new();
        let mut driver = TickDriver::new(buf, RecordingPin::default());

        assert_eq!(driver.on_tick(), Err(TxError::Finished));
        assert!(driver.pin().writes.is_empty());
        assert_eq!(driver.level(), None);
    }

    #[test]
    fn mark_idle_parks_high_once() {
        let buf: PayloadBuffer<4> = PayloadBuffer::new();
        let mut driver =
            TickDriver::new(buf, RecordingPin::default()).with_idle(IdleLevel::Mark);

        for _ in 0..3 {
            assert_eq!(driver.on_tick(), Err(TxError::Finished));
        }
        assert_eq!(driver.pin().writes, [true]);
    }
}
