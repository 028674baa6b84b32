// SPDX-License-Identifier: GPL-3.0-only
//! Brightness feature report layout
//!
//! The same 7 byte layout is used to read and to write:
//!
//! | byte | meaning                      |
//! |------|------------------------------|
//! | 0    | report id, always 0          |
//! | 1-2  | brightness, little-endian    |
//! | 3-6  | reserved, zero               |

/// HID feature report size in bytes
pub const REPORT_SIZE: usize = 7;

/// HID Report ID for brightness control
pub const REPORT_ID: u8 = 0;

pub type FeatureReport = [u8; REPORT_SIZE];

/// Buffer to pass to a feature report read
pub fn empty() -> FeatureReport {
    let mut buf = [0u8; REPORT_SIZE];
    buf[0] = REPORT_ID;
    buf
}

/// Pack a native brightness value into a report
pub fn encode(value: u16) -> FeatureReport {
    let mut buf = empty();
    buf[1..3].copy_from_slice(&value.to_le_bytes());
    buf
}

/// Extract the native brightness value from a report
pub fn decode(buf: &FeatureReport) -> u16 {
    u16::from_le_bytes([buf[1], buf[2]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        assert_eq!(encode(0x6a40), [0x00, 0x40, 0x6a, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(encode(0xd2f0), [0x00, 0xf0, 0xd2, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_decode_ignores_reserved_bytes() {
        assert_eq!(decode(&[0x00, 0x90, 0x01, 0xff, 0xff, 0xff, 0xff]), 0x0190);
    }
}
