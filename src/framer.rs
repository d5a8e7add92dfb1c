//! RTTY Bit Framer
//!
//! Turns payload bytes into an asynchronous serial bitstream, one bit per
//! call. The keying interrupt calls [`RttyFramer::next_bit`] once per baud
//! period, so bit timing comes from the same periodic source that drives
//! the output line.
//!
//! # Frame Layout
//!
//! ```text
//!  slot:   0     1    2    3    4    5    6    7    8     9
//!        ┌─────┬────┬────┬────┬────┬────┬────┬────┬─────┬─────┐
//!        │START│ b0 │ b1 │ b2 │ b3 │ b4 │ b5 │ b6 │STOP │STOP │
//!        │  0  │          data, LSB first           │  1  │  1  │
//!        └─────┴────┴────┴────┴────┴────┴────┴────┴─────┴─────┘
//! ```
//!
//! Each stop bit occupies its own slot. A byte is only pulled from the
//! source on slot 0, so a frame always completes before the next byte is
//! read.

use crate::payload::ByteSource;
use crate::types::TxResult;

/// Character framing parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameFormat {
    data_bits: u8,
    stop_bits: u8,
}

impl FrameFormat {
    /// 7 data bits, 2 stop bits (standard telemetry beacon framing)
    pub const ASCII7_2STOP: Self = Self {
        data_bits: 7,
        stop_bits: 2,
    };

    /// 7 data bits, 1 stop bit
    pub const ASCII7_1STOP: Self = Self {
        data_bits: 7,
        stop_bits: 1,
    };

    /// 8 data bits, 2 stop bits
    pub const ASCII8_2STOP: Self = Self {
        data_bits: 8,
        stop_bits: 2,
    };

    /// Create a format, returns None for unsupported combinations
    ///
    /// Supported: 7 or 8 data bits, 1 or 2 stop bits.
    #[must_use]
    pub const fn new(data_bits: u8, stop_bits: u8) -> Option<Self> {
        if (data_bits == 7 || data_bits == 8) && (stop_bits == 1 || stop_bits == 2) {
            Some(Self {
                data_bits,
                stop_bits,
            })
        } else {
            None
        }
    }

    /// Number of data bits per character
    #[must_use]
    pub const fn data_bits(self) -> u8 {
        self.data_bits
    }

    /// Number of stop bits per character
    #[must_use]
    pub const fn stop_bits(self) -> u8 {
        self.stop_bits
    }

    /// Total bit periods per character, including start and stop bits
    #[must_use]
    pub const fn frame_len(self) -> u8 {
        1 + self.data_bits + self.stop_bits
    }

    /// Mask of the data bits that reach the air
    #[must_use]
    pub const fn data_mask(self) -> u8 {
        if self.data_bits >= 8 {
            0xFF
        } else {
            (1 << self.data_bits) - 1
        }
    }
}

impl Default for FrameFormat {
    fn default() -> Self {
        Self::ASCII7_2STOP
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FrameFormat {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}N{}", self.data_bits, self.stop_bits);
    }
}

/// Slot-by-slot RTTY encoder over a byte source
#[derive(Debug)]
pub struct RttyFramer<S> {
    /// Where bytes come from
    source: S,
    /// Character framing
    format: FrameFormat,
    /// Position within the current frame (0 = start bit)
    slot: u8,
    /// Byte being framed
    current: u8,
}

impl<S: ByteSource> RttyFramer<S> {
    /// Start bit slot
    const SLOT_START: u8 = 0;

    /// First data bit slot
    const SLOT_DATA0: u8 = 1;

    /// Create a framer with the default ASCII-7, two stop bit format
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_format(source, FrameFormat::default())
    }

    /// Create a framer with an explicit frame format
    #[must_use]
    pub fn with_format(source: S, format: FrameFormat) -> Self {
        Self {
            source,
            format,
            slot: Self::SLOT_START,
            current: 0,
        }
    }

    /// Produce the bit for the current tick
    ///
    /// On the start slot a byte is pulled from the source. If none is
    /// available the source's status (normally [`TxError::Finished`]) is
    /// returned and the cursor stays on the start slot, so the caller must
    /// hold the line for this tick.
    ///
    /// [`TxError::Finished`]: crate::types::TxError::Finished
    pub fn next_bit(&mut self) -> TxResult<bool> {
        let stop_slot = Self::SLOT_DATA0 + self.format.data_bits;

        let bit = if self.slot == Self::SLOT_START {
            self.current = self.source.pull()?;
            false
        } else if self.slot < stop_slot {
            (self.current >> (self.slot - Self::SLOT_DATA0)) & 1 == 1
        } else {
            true
        };

        self.slot += 1;
        if self.slot >= self.format.frame_len() {
            self.slot = Self::SLOT_START;
        }

        Ok(bit)
    }

    /// Check if the framer is between characters
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.slot == Self::SLOT_START
    }

    /// Current slot within the frame
    #[must_use]
    pub const fn slot(&self) -> u8 {
        self.slot
    }

    /// Active frame format
    #[must_use]
    pub const fn format(&self) -> FrameFormat {
        self.format
    }

    /// Abandon the current character and return to the start slot
    pub fn reset(&mut self) {
        self.slot = Self::SLOT_START;
        self.current = 0;
    }

    /// Borrow the byte source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutably borrow the byte source
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
