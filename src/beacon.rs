//! Beacon Task
//!
//! Producer side of the transmit path. Formats the beacon sentence with its
//! checksum and hands it to the payload buffer, asking the scheduler for a
//! quick retry while the previous sentence is still on air.
//!
//! Sentence format: `<text>*<CRC16 as 4 upper-case hex digits>\n`

use core::fmt::Write;

use heapless::String;

use crate::checksum::sentence_checksum;
use crate::config::{beacon_period, retry_period, MAX_PAYLOAD_SIZE, MESSAGE_CAPACITY};
use crate::payload::SharedPayload;
use crate::scheduler::Task;
use crate::types::{Millis, TxError, TxResult};
use crate::{log_debug, log_info, log_warn};

/// Checksum function applied to the sentence text
pub type ChecksumFn = fn(&[u8]) -> u16;

/// Formatted sentence ready for hand-off
pub type Sentence = String<MESSAGE_CAPACITY>;

/// Build `<text>*XXXX\n`
///
/// Returns [`TxError::Fault`] if the text does not fit the sentence buffer.
pub fn format_sentence(text: &str, checksum: ChecksumFn) -> TxResult<Sentence> {
    let mut sentence = Sentence::new();
    let crc = checksum(text.as_bytes());
    writeln!(sentence, "{text}*{crc:04X}").map_err(|_| TxError::Fault)?;
    Ok(sentence)
}

/// Periodic beacon producer
pub struct BeaconTask<'a, const N: usize = MAX_PAYLOAD_SIZE> {
    /// Hand-off buffer shared with the keying interrupt
    payload: &'a SharedPayload<N>,
    /// Sentence body
    text: &'a str,
    /// Checksum appended to each sentence
    checksum: ChecksumFn,
    /// Period after a successful hand-off
    period: Millis,
    /// Period while the buffer is busy
    retry: Millis,
    /// Sentences handed off
    sent: u32,
    /// Attempts rejected because the buffer was busy
    deferred: u32,
}

impl<'a, const N: usize> BeaconTask<'a, N> {
    /// Create a beacon with the default checksum and periods
    #[must_use]
    pub fn new(payload: &'a SharedPayload<N>, text: &'a str) -> Self {
        Self {
            payload,
            text,
            checksum: sentence_checksum,
            period: beacon_period(),
            retry: retry_period(),
            sent: 0,
            deferred: 0,
        }
    }

    /// Replace the checksum function
    #[must_use]
    pub fn with_checksum(mut self, checksum: ChecksumFn) -> Self {
        self.checksum = checksum;
        self
    }

    /// Replace the steady-state and retry periods
    #[must_use]
    pub fn with_periods(mut self, period: Millis, retry: Millis) -> Self {
        self.period = period;
        self.retry = retry;
        self
    }

    /// Format and try to hand off one sentence
    pub fn send(&mut self) -> TxResult<usize> {
        let sentence = format_sentence(self.text, self.checksum)?;
        self.payload.set_payload(sentence.as_bytes())
    }

    /// Sentences handed off so far
    #[must_use]
    pub const fn sent(&self) -> u32 {
        self.sent
    }

    /// Attempts deferred because the buffer was busy
    #[must_use]
    pub const fn deferred(&self) -> u32 {
        self.deferred
    }
}

impl<const N: usize> Task for BeaconTask<'_, N> {
    fn run(&mut self, _now: Millis) -> Option<Millis> {
        match self.send() {
            Ok(len) => {
                self.sent = self.sent.wrapping_add(1);
                log_info!("beacon: queued {} bytes", len);
                Some(self.period)
            }
            Err(TxError::Busy) => {
                self.deferred = self.deferred.wrapping_add(1);
                log_debug!("beacon: buffer busy, retrying");
                Some(self.retry)
            }
            Err(err) => {
                log_warn!("beacon: cannot build sentence ({})", err);
                Some(self.period)
            }
        }
    }
}
