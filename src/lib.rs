//! RTTY Beacon Firmware Library
//!
//! Core of a microcontroller beacon that sends a short telemetry sentence
//! as an RTTY bitstream (1 start, 7 data bits LSB first, 2 stop bits) at
//! 50 baud. Bit timing comes from a periodic keying interrupt; sentence
//! production runs cooperatively in the main loop.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────── MAIN CONTEXT (cooperative) ─────────────────────┐
//! │  Scheduler ──▶ BeaconTask ── format + checksum ──▶ set_payload()     │
//! │                                            (critical section, BUSY   │
//! │                                             ⇒ retry sooner)          │
//! ├──────────────────────────────┬───────────────────────────────────────┤
//! │                      SharedPayload (one message)                     │
//! ├──────────────────────────────┴───────────────────────────────────────┤
//! │  get_byte() ◀── RttyFramer ◀── TickDriver ──▶ radio data pin          │
//! └──────────────────── KEYING CONTEXT (periodic IRQ) ───────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **No allocation**: all buffers are fixed-capacity (`heapless`)
//! - **One shared object**: the payload buffer is the only state crossing
//!   contexts, and its writer masks the reader via `critical-section`
//! - **Flow control, not failure**: drained and busy buffers are statuses
//!   the caller acts on, never panics
//! - **Host-testable core**: hardware sits behind `embedded-hal` traits and
//!   the [`scheduler::Clock`] trait

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Logging macros (defmt on target)
pub mod logging;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Single-message hand-off buffer between main loop and keying interrupt
pub mod payload;

/// RTTY start/data/stop bit framing
pub mod framer;

/// Cooperative task scheduler
pub mod scheduler;

/// Sentence checksum
pub mod checksum;

/// Beacon sentence producer
pub mod beacon;

/// Per-tick keying of the output line
pub mod driver;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::beacon::BeaconTask;
    pub use crate::config::*;
    pub use crate::driver::{IdleLevel, TickDriver};
    pub use crate::framer::{FrameFormat, RttyFramer};
    pub use crate::payload::{ByteSource, PayloadBuffer, SharedPayload};
    pub use crate::scheduler::{Clock, Execute, ScheduledTask, Scheduler, Task};
    pub use crate::types::*;
}
