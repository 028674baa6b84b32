// SPDX-License-Identifier: GPL-3.0-only
//! Device-specific configurations organized by manufacturer

pub mod lg;

/// Identifies the brightness interface of a display among all HID devices
///
/// Matching is done on the vendor id plus a marker contained in the
/// advertised product string. The product id is not part of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSignature {
    /// USB Vendor ID
    pub vendor_id: u16,

    /// Substring that must appear in the HID product string
    pub product_marker: &'static str,
}

impl DeviceSignature {
    /// Check whether an enumerated HID device carries this signature
    ///
    /// A device that reports no product string never matches.
    pub fn matches(&self, vendor_id: u16, product: Option<&str>) -> bool {
        vendor_id == self.vendor_id
            && product.is_some_and(|product| product.contains(self.product_marker))
    }
}

/// Device specification for a display
#[derive(Debug, Clone)]
pub struct DeviceSpec {
    /// USB Product ID (informational, discovery goes through the signature)
    pub product_id: u16,

    /// Human-readable device name
    pub name: &'static str,

    /// How the brightness interface is found on the bus
    pub signature: DeviceSignature,

    /// Minimum brightness protocol value
    /// This is the raw value sent to the device in its feature report
    pub min_brightness_value: u16,

    /// Maximum brightness protocol value
    pub max_brightness_value: u16,
}

impl DeviceSpec {
    /// Get the brightness protocol value range (max - min)
    pub fn brightness_range(&self) -> u16 {
        self.max_brightness_value - self.min_brightness_value
    }
}
