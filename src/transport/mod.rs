// SPDX-License-Identifier: GPL-3.0-only
//! HID transport
//!
//! The session only talks to the bus through [`HidTransport`], so it can be
//! driven by hidapi on real hardware and by a stub in tests.

pub mod usb_hid;
pub mod report;

#[cfg(test)]
pub mod mock;

use std::ffi::{CStr, CString, NulError};
use std::fmt;

use crate::error::Result;

pub use report::FeatureReport;

/// Platform path of a HID device, as reported by enumeration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DevicePath(CString);

impl DevicePath {
    pub fn as_c_str(&self) -> &CStr {
        &self.0
    }
}

impl From<&CStr> for DevicePath {
    fn from(path: &CStr) -> Self {
        Self(path.to_owned())
    }
}

impl TryFrom<&str> for DevicePath {
    type Error = NulError;

    fn try_from(path: &str) -> std::result::Result<Self, Self::Error> {
        CString::new(path).map(Self)
    }
}

impl fmt::Display for DevicePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

/// One entry of a HID enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HidDeviceEntry {
    pub vendor_id: u16,
    pub product_id: u16,
    pub product: Option<String>,
    pub path: DevicePath,
}

/// Capability to enumerate, open and exchange feature reports with HID devices
pub trait HidTransport {
    /// An open device. Owned by whoever opened it until passed to `close`.
    type Handle;

    /// List every HID device on the host, in host order
    fn enumerate(&mut self) -> Result<Vec<HidDeviceEntry>>;

    /// Open the device at `path`
    fn open(&mut self, path: &DevicePath) -> Result<Self::Handle>;

    /// Release an open device
    fn close(&mut self, handle: Self::Handle);

    /// Write a feature report
    fn send_feature_report(&mut self, handle: &Self::Handle, report: &FeatureReport)
        -> Result<()>;

    /// Read a feature report into `report`. Byte 0 selects the report id.
    fn get_feature_report(&mut self, handle: &Self::Handle, report: &mut FeatureReport)
        -> Result<()>;
}
