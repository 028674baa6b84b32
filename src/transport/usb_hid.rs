// SPDX-License-Identifier: GPL-3.0-only
//! hidapi backed transport

use anyhow::Context;
use hidapi::{HidApi, HidDevice};

use crate::error::{AppError, Result};

use super::{DevicePath, FeatureReport, HidDeviceEntry, HidTransport};

/// Transport over the platform HID stack through hidapi
pub struct UsbHidTransport {
    api: HidApi,
}

impl UsbHidTransport {
    /// Initialize the HID library
    pub fn new() -> anyhow::Result<Self> {
        let api = HidApi::new().context("Failed to initialize HID API")?;
        Ok(Self { api })
    }
}

impl std::fmt::Debug for UsbHidTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UsbHidTransport")
    }
}

impl HidTransport for UsbHidTransport {
    type Handle = HidDevice;

    fn enumerate(&mut self) -> Result<Vec<HidDeviceEntry>> {
        self.api
            .refresh_devices()
            .map_err(|e| AppError::TransportIo(format!("HID enumeration failed: {e}")))?;

        let devices = self
            .api
            .device_list()
            .map(|device_info| HidDeviceEntry {
                vendor_id: device_info.vendor_id(),
                product_id: device_info.product_id(),
                product: device_info.product_string().map(str::to_string),
                path: DevicePath::from(device_info.path()),
            })
            .collect::<Vec<_>>();

        tracing::trace!("Enumerated {} HID device(s)", devices.len());
        Ok(devices)
    }

    fn open(&mut self, path: &DevicePath) -> Result<HidDevice> {
        self.api
            .open_path(path.as_c_str())
            .map_err(|e| AppError::OpenFailed {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }

    fn close(&mut self, handle: HidDevice) {
        // hid_close runs when the device is dropped
        drop(handle);
    }

    fn send_feature_report(&mut self, handle: &HidDevice, report: &FeatureReport) -> Result<()> {
        handle
            .send_feature_report(report)
            .map_err(|e| AppError::TransportIo(format!("Failed to send HID feature report: {e}")))
    }

    fn get_feature_report(&mut self, handle: &HidDevice, report: &mut FeatureReport) -> Result<()> {
        let read = handle
            .get_feature_report(report)
            .map_err(|e| AppError::TransportIo(format!("Failed to read HID feature report: {e}")))?;

        if read < 3 {
            return Err(AppError::TransportIo(format!(
                "Short HID feature report: {read} byte(s)"
            )));
        }

        Ok(())
    }
}
