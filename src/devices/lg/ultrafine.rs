// SPDX-License-Identifier: GPL-3.0-only
//! LG UltraFine specifications

use crate::devices::{DeviceSignature, DeviceSpec};

/// USB Product ID for the LG UltraFine brightness interface
pub const PRODUCT_ID: u16 = 0x9a40;

/// Lowest native brightness accepted by the firmware
pub const MIN_BRIGHTNESS: u16 = 0x0190;

/// Highest native brightness accepted by the firmware
pub const MAX_BRIGHTNESS: u16 = 0xd2f0;

/// The brightness interface advertises itself with this in its product string
pub const PRODUCT_MARKER: &str = "BRIGHTNESS";

pub const SIGNATURE: DeviceSignature = DeviceSignature {
    vendor_id: super::VENDOR_ID,
    product_marker: PRODUCT_MARKER,
};

/// Device specification for the LG UltraFine
///
/// Technical specs:
/// - USB HID control through a 7 byte feature report, report id 0
/// - Brightness value is a little-endian u16 in bytes 1-2
/// - Bytes 3-6 are reserved and sent as zero
pub const SPEC: DeviceSpec = DeviceSpec {
    product_id: PRODUCT_ID,
    name: "LG UltraFine Display",
    signature: SIGNATURE,
    min_brightness_value: MIN_BRIGHTNESS,
    max_brightness_value: MAX_BRIGHTNESS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ultrafine_spec() {
        assert_eq!(SPEC.product_id, 0x9a40);
        assert_eq!(SPEC.signature.vendor_id, 0x043e);
        assert_eq!(SPEC.min_brightness_value, 400);
        assert_eq!(SPEC.max_brightness_value, 54000);
        assert_eq!(SPEC.brightness_range(), 53600);
    }
}
