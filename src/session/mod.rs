// SPDX-License-Identifier: GPL-3.0-only
//! Display session
//!
//! Owns the one open handle to the display and everything that opens, closes,
//! reads or writes it.

mod discovery;
mod manager;

pub use discovery::first_match;
pub use manager::DeviceSession;

use std::fmt;

/// Result of a refresh, and the only connection state callers should rely on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionOutcome {
    /// The display is open, carrying its current brightness in percent
    Connected(u8),
    /// The display was found but could not be opened
    OpenFailed,
    /// No display was found
    NotFound,
}

impl ConnectionOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionOutcome::Connected(_))
    }

    /// Whether brightness input should be accepted
    pub fn control_enabled(&self) -> bool {
        self.is_connected()
    }
}

impl fmt::Display for ConnectionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionOutcome::Connected(percent) => write!(f, "{}", brightness_status(*percent)),
            ConnectionOutcome::OpenFailed => write!(f, "Unable to connect to monitor."),
            ConnectionOutcome::NotFound => write!(f, "Monitor disconnected."),
        }
    }
}

/// Status line shown when a refresh finds and opens the display
pub const CONNECTED_STATUS: &str = "Monitor connected.";

/// Status line shown for a brightness level
pub fn brightness_status(percent: u8) -> String {
    format!("Current Brightness: {}%", percent)
}
