// SPDX-License-Identifier: GPL-3.0-only
//! Error types for the application
//!
//! Session failures never escalate: they are logged and the session is left
//! disconnected. These types carry the detail to the log.

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// No enumerated HID device carries the display's signature
    #[error("Display not found")]
    DeviceNotFound,

    /// A matching device was found but its handle could not be opened
    #[error("Failed to open HID device {path}: {reason}")]
    OpenFailed { path: String, reason: String },

    /// A feature report read or write failed on an open handle
    #[error("HID transport error: {0}")]
    TransportIo(String),

    /// An operation needed an open session
    #[error("No display session is open")]
    NotConnected,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;
