//! Beacon Task Tests
//!
//! Tests for sentence formatting, checksum, busy back-off and the full
//! producer → buffer → framer path.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test beacon_tests

use rtty_beacon::beacon::{format_sentence, BeaconTask};
use rtty_beacon::checksum::{crc16, crc16_update, sentence_checksum};
use rtty_beacon::config::{beacon_period, retry_period, BEACON_TEXT};
use rtty_beacon::framer::RttyFramer;
use rtty_beacon::payload::SharedPayload;
use rtty_beacon::scheduler::{ScheduledTask, Task};
use rtty_beacon::types::{Millis, TxError};

/// Decode framed bits back to bytes until the framer runs dry
fn receive(framer: &mut RttyFramer<&SharedPayload>) -> Vec<u8> {
    let mut bytes = Vec::new();
    loop {
        match framer.next_bit() {
            Err(TxError::Finished) => return bytes,
            Err(e) => panic!("unexpected status {e}"),
            Ok(start) => {
                assert!(!start, "start bit");
                let mut byte = 0u8;
                for i in 0..7 {
                    if framer.next_bit().unwrap() {
                        byte |= 1 << i;
                    }
                }
                assert!(framer.next_bit().unwrap(), "stop bit 1");
                assert!(framer.next_bit().unwrap(), "stop bit 2");
                bytes.push(byte);
            }
        }
    }
}

// =============================================================================
// Checksum Tests
// =============================================================================

#[test]
fn crc_check_value() {
    assert_eq!(crc16(b"123456789"), 0x29B1);
}

#[test]
fn crc_incremental_matches_bulk() {
    let data = b"RTTY TEST BEACON";
    let incremental = data.iter().fold(0xFFFF, |crc, &b| crc16_update(crc, b));
    assert_eq!(incremental, crc16(data));
}

#[test]
fn sentence_checksum_ignores_sync_prefix() {
    assert_eq!(sentence_checksum(b"$$PAYLOAD"), crc16(b"PAYLOAD"));
}

#[test]
fn checksum_is_deterministic() {
    let text = BEACON_TEXT.as_bytes();
    assert_eq!(sentence_checksum(text), sentence_checksum(text));
}

// =============================================================================
// Sentence Format Tests
// =============================================================================

#[test]
fn default_sentence_layout() {
    let sentence = format_sentence(BEACON_TEXT, sentence_checksum).unwrap();
    let s = sentence.as_str();

    assert!(s.starts_with(BEACON_TEXT));
    assert!(s.ends_with('\n'));

    let tail = &s[BEACON_TEXT.len()..];
    assert_eq!(tail.len(), 6);
    assert!(tail.starts_with('*'));
    let crc = u16::from_str_radix(&tail[1..5], 16).unwrap();
    assert_eq!(crc, sentence_checksum(BEACON_TEXT.as_bytes()));
    assert!(tail[1..5].chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
}

#[test]
fn default_sentence_fits_payload() {
    let sentence = format_sentence(BEACON_TEXT, sentence_checksum).unwrap();
    assert!(sentence.len() <= 64);
}

#[test]
fn zero_checksum_is_padded() {
    let sentence = format_sentence("A", |_| 0x000F).unwrap();
    assert_eq!(sentence.as_str(), "A*000F\n");
}

// =============================================================================
// Back-off Tests
// =============================================================================

#[test]
fn success_then_busy_then_success() {
    let payload: SharedPayload = SharedPayload::new();
    let mut beacon = BeaconTask::new(&payload, "CQ");

    assert_eq!(beacon.run(Millis::ZERO), Some(beacon_period()));
    assert_eq!(beacon.run(Millis::ZERO), Some(retry_period()));
    assert_eq!(beacon.run(Millis::ZERO), Some(retry_period()));
    assert_eq!(beacon.deferred(), 2);

    while payload.get_byte().is_ok() {}

    assert_eq!(beacon.run(Millis::ZERO), Some(beacon_period()));
    assert_eq!(beacon.sent(), 2);
}

#[test]
fn custom_periods() {
    let payload: SharedPayload = SharedPayload::new();
    let mut beacon =
        BeaconTask::new(&payload, "CQ").with_periods(Millis::new(5_000), Millis::new(20));

    assert_eq!(beacon.run(Millis::ZERO), Some(Millis::new(5_000)));
    assert_eq!(beacon.run(Millis::ZERO), Some(Millis::new(20)));
}

#[test]
fn fault_keeps_slow_cadence() {
    let payload: SharedPayload = SharedPayload::new();
    let text = "X".repeat(90);
    let mut beacon = BeaconTask::new(&payload, &text);

    assert_eq!(beacon.send(), Err(TxError::Fault));
    assert_eq!(beacon.run(Millis::ZERO), Some(beacon_period()));
    assert!(payload.is_empty());
    assert_eq!(beacon.sent(), 0);
}

// =============================================================================
// End-to-End Tests
// =============================================================================

#[test]
fn scheduled_beacon_reaches_the_air() {
    let payload: SharedPayload = SharedPayload::new();
    let beacon = BeaconTask::new(&payload, "$$HELLO").with_checksum(|_| 0xABCD);
    let mut task = ScheduledTask::new(beacon);
    task.schedule(Millis::ZERO);
    assert!(task.execute(Millis::new(1)));

    let mut framer = RttyFramer::new(&payload);
    assert_eq!(receive(&mut framer), b"$$HELLO*ABCD\n");
}

#[test]
fn retry_lands_after_drain() {
    let payload: SharedPayload = SharedPayload::new();
    let mut task = ScheduledTask::new(BeaconTask::new(&payload, "AB"));
    let mut framer = RttyFramer::new(&payload);
    task.schedule(Millis::ZERO);

    let mut now = 0u32;
    task.execute(Millis::new(now));
    let first = receive(&mut framer);
    assert!(first.starts_with(b"AB*"));

    // Second attempt at the beacon period succeeds since the air is clear
    now += beacon_period().as_ms();
    assert!(task.execute(Millis::new(now)));
    assert_eq!(task.period(), beacon_period());
    assert_eq!(receive(&mut framer), first);
    assert_eq!(task.task().sent(), 2);
}

#[test]
fn busy_buffer_retries_quickly() {
    let payload: SharedPayload = SharedPayload::new();
    let mut task = ScheduledTask::new(BeaconTask::new(&payload, "AB"));
    task.schedule(Millis::ZERO);

    task.execute(Millis::ZERO);
    let next = beacon_period().as_ms();
    assert!(task.execute(Millis::new(next)));

    // Nothing drained: rejected, retry period requested
    assert_eq!(task.period(), retry_period());
    assert!(!task.execute(Millis::new(next + retry_period().as_ms() - 1)));
    assert!(task.execute(Millis::new(next + retry_period().as_ms())));
    assert_eq!(task.task().deferred(), 2);
}
