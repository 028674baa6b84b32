// SPDX-License-Identifier: GPL-3.0-only
//! Brightness calculation logic
//!
//! Converts between the 0-100 percentage the user works with and the native
//! protocol value the display firmware understands. Both directions are a
//! rounded, clamped affine transform over the device's brightness range.

use crate::config::Config;
use crate::devices::DeviceSpec;

/// Convert a percentage (0-100) to the native protocol value for a device
///
/// Percentages above 100 are treated as 100.
pub fn percent_to_native(spec: &DeviceSpec, percent: u8) -> u16 {
    let percent = u32::from(percent.min(100));
    let range = u32::from(spec.brightness_range());
    let offset = (percent * range + 50) / 100;
    let value = u32::from(spec.min_brightness_value) + offset;
    value.clamp(
        u32::from(spec.min_brightness_value),
        u32::from(spec.max_brightness_value),
    ) as u16
}

/// Convert a native protocol value to a percentage (0-100) for a device
pub fn native_to_percent(spec: &DeviceSpec, value: u16) -> u8 {
    let min_value = spec.min_brightness_value;
    let max_value = spec.max_brightness_value;

    if value <= min_value {
        return 0;
    }
    if value >= max_value {
        return 100;
    }

    let range = u32::from(spec.brightness_range());
    let offset = u32::from(value - min_value);
    let percent = (offset * 100 + range / 2) / range;
    percent.min(100) as u8
}

/// Applies the configured brightness floor to user requested levels
pub struct BrightnessCalculator<'a> {
    config: &'a Config,
}

impl<'a> BrightnessCalculator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Final percentage to send to the display for a requested level
    ///
    /// Values above 100 are clamped to 100, values below the configured
    /// minimum are raised to it.
    pub fn calculate(&self, requested: u8) -> u8 {
        let requested = requested.min(100);
        let min_brightness = self.config.min_brightness.min(100);
        if requested < min_brightness {
            tracing::debug!(
                calculated = %requested,
                min = %min_brightness,
                "Clamping brightness to minimum"
            );
            return min_brightness;
        }
        requested
    }

    /// Move the current level by `steps` configured increments
    pub fn nudge(&self, current: u8, steps: i8) -> u8 {
        let delta = i16::from(steps) * i16::from(self.config.step);
        let target = (i16::from(current) + delta).clamp(0, 100) as u8;
        self.calculate(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::lg::ultrafine::{MAX_BRIGHTNESS, MIN_BRIGHTNESS, SPEC};

    #[test]
    fn test_endpoints() {
        assert_eq!(percent_to_native(&SPEC, 0), MIN_BRIGHTNESS);
        assert_eq!(percent_to_native(&SPEC, 100), MAX_BRIGHTNESS);
        assert_eq!(native_to_percent(&SPEC, MIN_BRIGHTNESS), 0);
        assert_eq!(native_to_percent(&SPEC, MAX_BRIGHTNESS), 100);
    }

    #[test]
    fn test_half_brightness() {
        // 0.5 * (0xd2f0 - 0x0190) + 0x0190
        assert_eq!(percent_to_native(&SPEC, 50), 0x6a40);
    }

    #[test]
    fn test_round_trip_within_one() {
        for percent in 0..=100u8 {
            let back = native_to_percent(&SPEC, percent_to_native(&SPEC, percent));
            assert!(
                back.abs_diff(percent) <= 1,
                "{percent}% came back as {back}%"
            );
        }
    }

    #[test]
    fn test_percent_to_native_monotonic_and_in_range() {
        let mut previous = 0;
        for percent in 0..=100u8 {
            let value = percent_to_native(&SPEC, percent);
            assert!(value >= previous);
            assert!((MIN_BRIGHTNESS..=MAX_BRIGHTNESS).contains(&value));
            previous = value;
        }
    }

    #[test]
    fn test_out_of_range_input() {
        assert_eq!(percent_to_native(&SPEC, 150), MAX_BRIGHTNESS);
        assert_eq!(native_to_percent(&SPEC, 0), 0);
        assert_eq!(native_to_percent(&SPEC, u16::MAX), 100);
    }

    #[test]
    fn test_native_to_percent_rounds() {
        // 1% of the range is 536 units, half of that rounds up
        assert_eq!(native_to_percent(&SPEC, MIN_BRIGHTNESS + 267), 0);
        assert_eq!(native_to_percent(&SPEC, MIN_BRIGHTNESS + 268), 1);
    }

    #[test]
    fn test_min_brightness_clamping() {
        let config = Config {
            min_brightness: 10,
            ..Config::default()
        };
        let calculator = BrightnessCalculator::new(&config);

        assert_eq!(calculator.calculate(0), 10);
        assert_eq!(calculator.calculate(55), 55);
        assert_eq!(calculator.calculate(200), 100);
    }

    #[test]
    fn test_nudge() {
        let config = Config {
            step: 5,
            ..Config::default()
        };
        let calculator = BrightnessCalculator::new(&config);

        assert_eq!(calculator.nudge(50, 1), 55);
        assert_eq!(calculator.nudge(50, -1), 45);
        assert_eq!(calculator.nudge(98, 1), 100);
        assert_eq!(calculator.nudge(2, -1), 0);
    }
}
