// SPDX-License-Identifier: GPL-3.0-only
//! Finding the display among all HID devices

use crate::devices::DeviceSignature;
use crate::transport::{DevicePath, HidDeviceEntry, HidTransport};

/// First entry, in enumeration order, carrying the signature
///
/// Several matching devices are not ranked: whichever the host lists first
/// wins, so the choice depends on the platform's enumeration order.
pub fn first_match<'a>(
    devices: &'a [HidDeviceEntry],
    signature: &DeviceSignature,
) -> Option<&'a HidDeviceEntry> {
    devices
        .iter()
        .find(|device| signature.matches(device.vendor_id, device.product.as_deref()))
}

/// Scan the live device list for the display's brightness interface
///
/// An enumeration failure is logged and reported as not found.
pub fn find_target_device_path<T: HidTransport>(
    transport: &mut T,
    signature: &DeviceSignature,
) -> Option<DevicePath> {
    let devices = match transport.enumerate() {
        Ok(devices) => devices,
        Err(e) => {
            warn!("HID enumeration failed: {}", e);
            return None;
        }
    };

    let found = first_match(&devices, signature).map(|device| {
        debug!(
            "Found HID display: vendor={:#06x} product={:#06x} ({:?}) path={}",
            device.vendor_id, device.product_id, device.product, device.path
        );
        device.path.clone()
    });

    let matches = devices
        .iter()
        .filter(|d| signature.matches(d.vendor_id, d.product.as_deref()))
        .count();
    if matches > 1 {
        warn!(
            "{} HID devices match {:#06x}/{:?}, using the first one listed",
            matches, signature.vendor_id, signature.product_marker
        );
    }

    found
}
