use std::os::fd::AsRawFd;

/// Monitors udev for HID hotplug events
///
/// This runs in a dedicated blocking thread because udev's MonitorSocket is not Send.
/// It uses libc::poll() to wait for events on the udev socket.
pub struct UdevMonitor {
    socket: udev::MonitorSocket,
}

impl UdevMonitor {
    /// Create a new udev monitor for hidraw device nodes
    ///
    /// Every HID device on the host shows up here, not only the display.
    pub fn new() -> Result<Self, std::io::Error> {
        let socket = udev::MonitorBuilder::new()?
            .match_subsystem("hidraw")?
            .listen()?;

        Ok(Self { socket })
    }

    /// Run the monitoring loop, calling the callback for each add or remove event
    ///
    /// This function blocks indefinitely, polling the udev socket.
    /// Returns only if there's a poll error or the callback asks to stop.
    pub fn run<F>(self, mut callback: F) -> std::io::Error
    where
        F: FnMut(udev::Event) -> bool, // Returns true to continue, false to stop
    {
        info!("HID hotplug monitoring started (monitoring hidraw subsystem)");

        let fd = self.socket.as_raw_fd();

        loop {
            let mut poll_fd = libc::pollfd {
                fd,
                events: libc::POLLIN,
                revents: 0,
            };

            // Block until socket has data (negative timeout = wait forever)
            let poll_result = unsafe { libc::poll(&mut poll_fd, 1, -1) };

            if poll_result < 0 {
                let err = std::io::Error::last_os_error();
                if err.kind() == std::io::ErrorKind::Interrupted {
                    continue;
                }
                error!("Poll error: {}", err);
                return err;
            }

            if poll_result == 0 {
                continue;
            }

            for event in self.socket.iter() {
                debug!(
                    "udev event: type={:?}, subsystem={:?}, syspath={:?}",
                    event.event_type(),
                    event.subsystem(),
                    event.syspath()
                );

                match event.event_type() {
                    udev::EventType::Add | udev::EventType::Remove => {
                        info!("HID device {:?} at {:?}", event.event_type(), event.syspath());

                        if !callback(event) {
                            info!("HID hotplug monitoring stopped by callback");
                            return std::io::Error::new(
                                std::io::ErrorKind::Interrupted,
                                "Stopped by callback",
                            );
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}
