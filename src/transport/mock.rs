// SPDX-License-Identifier: GPL-3.0-only
//! Stub transport for testing
//!
//! Simulates device presence, absence and I/O failure without hardware. It
//! refuses to open a second handle while one is still open.

use crate::error::{AppError, Result};

use super::{report, DevicePath, FeatureReport, HidDeviceEntry, HidTransport};

#[derive(Debug, PartialEq, Eq)]
pub struct MockHandle {
    pub path: DevicePath,
}

#[derive(Debug, Default)]
pub struct MockTransport {
    /// Returned by `enumerate`, in this order
    pub devices: Vec<HidDeviceEntry>,
    /// Returned by `get_feature_report`
    pub report: FeatureReport,
    pub fail_enumerate: bool,
    pub fail_open: bool,
    pub fail_read: bool,
    pub fail_write: bool,

    /// Handles currently open
    pub open_handles: usize,
    /// Every path passed to a successful `open`
    pub opened: Vec<DevicePath>,
    pub closed: usize,
    /// Every report passed to `send_feature_report`
    pub sent: Vec<FeatureReport>,
}

impl MockTransport {
    /// Stub with the given devices enumerated and a current native brightness
    pub fn with_devices(devices: Vec<HidDeviceEntry>, brightness: u16) -> Self {
        Self {
            devices,
            report: report::encode(brightness),
            ..Self::default()
        }
    }
}

pub fn entry(vendor_id: u16, product: &str, path: &str) -> HidDeviceEntry {
    HidDeviceEntry {
        vendor_id,
        product_id: 0x9a40,
        product: Some(product.to_string()),
        path: DevicePath::try_from(path).unwrap(),
    }
}

impl HidTransport for MockTransport {
    type Handle = MockHandle;

    fn enumerate(&mut self) -> Result<Vec<HidDeviceEntry>> {
        if self.fail_enumerate {
            return Err(AppError::TransportIo("enumeration failed".to_string()));
        }
        Ok(self.devices.clone())
    }

    fn open(&mut self, path: &DevicePath) -> Result<MockHandle> {
        if self.open_handles > 0 {
            return Err(AppError::OpenFailed {
                path: path.to_string(),
                reason: "a handle is already open".to_string(),
            });
        }
        if self.fail_open || !self.devices.iter().any(|d| &d.path == path) {
            return Err(AppError::OpenFailed {
                path: path.to_string(),
                reason: "access denied".to_string(),
            });
        }

        self.open_handles += 1;
        self.opened.push(path.clone());
        Ok(MockHandle { path: path.clone() })
    }

    fn close(&mut self, _handle: MockHandle) {
        self.open_handles -= 1;
        self.closed += 1;
    }

    fn send_feature_report(&mut self, _handle: &MockHandle, report: &FeatureReport) -> Result<()> {
        if self.fail_write {
            return Err(AppError::TransportIo("write failed".to_string()));
        }
        self.sent.push(*report);
        self.report = *report;
        Ok(())
    }

    fn get_feature_report(&mut self, _handle: &MockHandle, report: &mut FeatureReport) -> Result<()> {
        if self.fail_read {
            return Err(AppError::TransportIo("read failed".to_string()));
        }
        *report = self.report;
        Ok(())
    }
}
