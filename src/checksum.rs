//! Sentence Checksum
//!
//! CRC-16 as used by UKHAS-style telemetry sentences: polynomial 0x1021,
//! initial value 0xFFFF, MSB first, no final XOR.

/// CRC-16 polynomial (x^16 + x^12 + x^5 + 1)
const POLY: u16 = 0x1021;

/// Initial register value
const INIT: u16 = 0xFFFF;

/// Number of sync characters (`$$`) excluded from a sentence checksum
pub const SYNC_PREFIX_LEN: usize = 2;

/// Fold one byte into a running CRC
#[must_use]
pub const fn crc16_update(crc: u16, byte: u8) -> u16 {
    let mut crc = crc ^ ((byte as u16) << 8);
    let mut i = 0;
    while i < 8 {
        crc = if crc & 0x8000 != 0 {
            (crc << 1) ^ POLY
        } else {
            crc << 1
        };
        i += 1;
    }
    crc
}

/// CRC-16 over a byte slice
#[must_use]
pub fn crc16(data: &[u8]) -> u16 {
    data.iter().fold(INIT, |crc, &b| crc16_update(crc, b))
}

/// Checksum of a telemetry sentence, skipping the `$$` sync prefix
///
/// The first [`SYNC_PREFIX_LEN`] bytes are skipped whatever they contain.
#[must_use]
pub fn sentence_checksum(sentence: &[u8]) -> u16 {
    crc16(sentence.get(SYNC_PREFIX_LEN..).unwrap_or(&[]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_value() {
        assert_eq!(crc16(b"123456789"), 0x29B1);
    }

    #[test]
    fn empty_input_is_init() {
        assert_eq!(crc16(b""), 0xFFFF);
    }

    #[test]
    fn sentence_skips_prefix() {
        assert_eq!(sentence_checksum(b"$$123456789"), 0x29B1);
        assert_eq!(sentence_checksum(b"XY123456789"), 0x29B1);
    }

    #[test]
    fn short_sentence() {
        assert_eq!(sentence_checksum(b"$"), 0xFFFF);
    }
}
