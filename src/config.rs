//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the RTTY beacon.
//! Pin mappings, timing, buffer capacities and the beacon text are
//! centralized here.

use crate::framer::FrameFormat;
use crate::types::Millis;

/// RTTY symbol rate in baud
pub const BAUD_RATE: u32 = 50;

/// Duration of one bit on air in microseconds
pub const BIT_PERIOD_US: u32 = 1_000_000 / BAUD_RATE;

/// On-air character framing (ASCII-7, two stop bits)
pub const FRAME_FORMAT: FrameFormat = FrameFormat::ASCII7_2STOP;

/// Payload buffer capacity in bytes
pub const MAX_PAYLOAD_SIZE: usize = 64;

/// Capacity of the sentence formatting buffer
pub const MESSAGE_CAPACITY: usize = 80;

/// Text transmitted by the beacon task
pub const BEACON_TEXT: &str = "RTTY TEST BEACON RTTY TEST BEACON";

/// Delay before re-sending after a message was handed off
pub const BEACON_PERIOD_MS: u32 = 2_000;

/// Retry delay while the previous message is still draining
pub const RETRY_PERIOD_MS: u32 = 100;

/// Main loop polling interval for the cooperative scheduler
pub const POLL_INTERVAL_MS: u64 = 1;

/// Build the beacon steady-state period
#[must_use]
pub const fn beacon_period() -> Millis {
    Millis::new(BEACON_PERIOD_MS)
}

/// Build the busy-retry period
#[must_use]
pub const fn retry_period() -> Millis {
    Millis::new(RETRY_PERIOD_MS)
}

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Radio keying output (transmitter data input)
    pub const RADIO_TX: &str = "PA0";
}
