// SPDX-License-Identifier: GPL-3.0-only
//! Session over the display's brightness interface
//!
//! # Lifecycle
//!
//! A session starts closed. [`DeviceSession::refresh`] always closes the
//! current handle before scanning again, so at most one handle is ever open.
//! The handle is closed on refresh, on [`DeviceSession::close`] and on drop.
//!
//! # Brightness reads
//!
//! [`DeviceSession::get_brightness`] answers the device minimum both when no
//! session is open and when the read fails, the same value a display at its
//! lowest setting reports. Connection state comes from the outcome of the
//! last refresh, never from a reading. Use [`DeviceSession::read_brightness`]
//! to tell the cases apart.

use crate::brightness::{native_to_percent, percent_to_native};
use crate::devices::DeviceSpec;
use crate::error::{AppError, Result};
use crate::transport::{report, DevicePath, HidDeviceEntry, HidTransport};

use super::discovery::find_target_device_path;
use super::ConnectionOutcome;

pub struct DeviceSession<T: HidTransport> {
    transport: T,
    spec: DeviceSpec,
    handle: Option<T::Handle>,
}

impl<T: HidTransport> DeviceSession<T> {
    /// Create a closed session for the display described by `spec`
    pub fn new(transport: T, spec: DeviceSpec) -> Self {
        Self {
            transport,
            spec,
            handle: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.handle.is_some()
    }

    pub fn spec(&self) -> &DeviceSpec {
        &self.spec
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[cfg(test)]
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Every HID device currently on the host
    pub fn enumerate(&mut self) -> Result<Vec<HidDeviceEntry>> {
        self.transport.enumerate()
    }

    /// Path of the first enumerated device carrying the display's signature
    pub fn find_target_device_path(&mut self) -> Option<DevicePath> {
        find_target_device_path(&mut self.transport, &self.spec.signature)
    }

    /// Drop the current handle and connect from scratch
    pub fn refresh(&mut self) -> ConnectionOutcome {
        self.close();

        let Some(path) = self.find_target_device_path() else {
            warn!("{}", AppError::DeviceNotFound);
            return ConnectionOutcome::NotFound;
        };

        match self.transport.open(&path) {
            Ok(handle) => {
                self.handle = Some(handle);
                info!(
                    "Monitor connected: {} ({:#06x}) at {}",
                    self.spec.name, self.spec.product_id, path
                );
                let value = self.get_brightness();
                ConnectionOutcome::Connected(native_to_percent(&self.spec, value))
            }
            Err(e) => {
                error!(
                    "{}. This may be a permissions issue. On Linux, ensure udev rules are configured.",
                    e
                );
                ConnectionOutcome::OpenFailed
            }
        }
    }

    /// Close the open handle, if any
    pub fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.transport.close(handle);
            debug!("Closed {} session", self.spec.name);
        }
    }

    /// Read the native brightness, failing when closed or on I/O error
    pub fn read_brightness(&mut self) -> Result<u16> {
        let handle = self.handle.as_ref().ok_or(AppError::NotConnected)?;

        let mut buf = report::empty();
        self.transport.get_feature_report(handle, &mut buf)?;

        let value = report::decode(&buf);
        debug!("{} brightness: protocol value {:#06x}", self.spec.name, value);
        Ok(value)
    }

    /// Current native brightness, or the device minimum if it can't be read
    pub fn get_brightness(&mut self) -> u16 {
        match self.read_brightness() {
            Ok(value) => value,
            Err(AppError::NotConnected) => self.spec.min_brightness_value,
            Err(e) => {
                warn!("Unable to get brightness: {}", e);
                self.spec.min_brightness_value
            }
        }
    }

    /// Current brightness as a percentage, with the same fallback as `get_brightness`
    pub fn get_normalized(&mut self) -> u8 {
        let value = self.get_brightness();
        native_to_percent(&self.spec, value)
    }

    /// Write a native brightness value
    ///
    /// Does nothing but log when no session is open or the write fails.
    pub fn set_brightness(&mut self, value: u16) {
        let Some(handle) = self.handle.as_ref() else {
            warn!("Attempted to set brightness with no monitor connected");
            return;
        };

        let value = value.clamp(self.spec.min_brightness_value, self.spec.max_brightness_value);
        let buf = report::encode(value);

        match self.transport.send_feature_report(handle, &buf) {
            Ok(()) => debug!(
                "Set {} brightness (protocol value: {:#06x})",
                self.spec.name, value
            ),
            Err(e) => error!("Unable to set brightness: {}", e),
        }
    }

    /// Write a brightness percentage (0-100)
    pub fn set_normalized(&mut self, percent: u8) {
        let value = percent_to_native(&self.spec, percent);
        debug!("Setting {}% (protocol value: {:#06x})", percent.min(100), value);
        self.set_brightness(value);
    }
}

impl<T: HidTransport> Drop for DeviceSession<T> {
    fn drop(&mut self) {
        self.close();
    }
}
