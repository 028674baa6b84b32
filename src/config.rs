// SPDX-License-Identifier: GPL-3.0-only
//! User configuration
//!
//! Read once at start-up from `config.toml` in the user's config directory.
//! Every key is optional; a missing file gives the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

pub const CONFIG_DIR: &str = "lg-ultrafine-brightness";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    /// Minimum brightness percentage (0-100) that will be sent to hardware
    pub min_brightness: u8,
    /// Percentage applied by a single `+` or `-` nudge
    pub step: u8,
    pub hotplug: HotplugConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_brightness: 0,
            step: 5,
            hotplug: HotplugConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct HotplugConfig {
    /// Minimum time between two re-scans triggered by hotplug events
    pub debounce_ms: u64,
    /// Delay after the last event before re-scanning, so the device node exists
    pub settle_ms: u64,
}

impl Default for HotplugConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 1500,
            settle_ms: 1000,
        }
    }
}

impl Config {
    /// Location of the config file, `None` if there is no config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Parse a config from its TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Read the config file at `path`
    ///
    /// A file that does not exist yields the defaults.
    pub fn read(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Load the config, falling back to defaults on any error
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => {
                warn!("No config directory available, using defaults");
                return Self::default();
            }
        };

        match Self::read(&path) {
            Ok(config) => {
                debug!("Loaded config from {}: {:?}", path.display(), config);
                config
            }
            Err(err) => {
                error!("errors loading config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }
}
