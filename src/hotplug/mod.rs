/// HID hotplug detection using udev
///
/// This module provides automatic detection of device plug/unplug events.
/// It monitors udev for hidraw device changes and asks the event loop to
/// re-scan when any HID device is added or removed.

#[cfg(all(target_os = "linux", feature = "udev-hotplug"))]
mod udev_monitor;
mod subscription;

pub use subscription::spawn_hotplug_watcher;
