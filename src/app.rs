// SPDX-License-Identifier: GPL-3.0-only
//! Event loop
//!
//! Everything that touches the display session happens here, one event at a
//! time, on the loop's task. Hotplug notifications and user input only ever
//! reach the session as [`AppEvent`]s.

use std::io::BufRead;
use std::str::FromStr;

use tokio::sync::mpsc;

use crate::brightness::BrightnessCalculator;
use crate::config::Config;
use crate::session::{brightness_status, ConnectionOutcome, DeviceSession, CONNECTED_STATUS};
use crate::transport::HidTransport;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    /// Re-scan requested by the user
    Refresh,
    /// A HID device was added or removed somewhere on the host
    TopologyChanged,
    /// Set the brightness to a percentage
    SetBrightness(u8),
    /// Move the brightness by this many configured steps
    Nudge(i8),
    /// Re-read the brightness and print the current status
    Status,
    Quit,
}

impl FromStr for AppEvent {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match line.trim() {
            "r" | "refresh" => Ok(AppEvent::Refresh),
            "s" | "status" => Ok(AppEvent::Status),
            "q" | "quit" | "exit" => Ok(AppEvent::Quit),
            "+" => Ok(AppEvent::Nudge(1)),
            "-" => Ok(AppEvent::Nudge(-1)),
            other => other
                .parse::<u32>()
                .map(|percent| AppEvent::SetBrightness(percent.min(100) as u8))
                .map_err(|_| format!("unrecognized input {other:?}, expected 0-100, +, -, refresh, status or quit")),
        }
    }
}

pub struct App<T: HidTransport> {
    session: DeviceSession<T>,
    config: Config,
    /// Outcome of the last refresh, with the level kept current after sets
    status: ConnectionOutcome,
}

impl<T: HidTransport> App<T> {
    pub fn new(session: DeviceSession<T>, config: Config) -> Self {
        Self {
            session,
            config,
            status: ConnectionOutcome::NotFound,
        }
    }

    pub fn status(&self) -> ConnectionOutcome {
        self.status
    }

    #[cfg(test)]
    pub fn session(&self) -> &DeviceSession<T> {
        &self.session
    }

    pub fn refresh(&mut self) -> ConnectionOutcome {
        self.status = self.session.refresh();
        info!("{}", self.status);
        self.status
    }

    /// Handle one event, returning the status line to show
    pub fn update(&mut self, event: AppEvent) -> Option<String> {
        match event {
            AppEvent::Refresh | AppEvent::TopologyChanged => match self.refresh() {
                outcome @ ConnectionOutcome::Connected(_) => {
                    Some(format!("{CONNECTED_STATUS}\n{outcome}"))
                }
                outcome => Some(outcome.to_string()),
            },
            AppEvent::Status => {
                if self.session.is_connected() {
                    self.status = ConnectionOutcome::Connected(self.session.get_normalized());
                }
                Some(self.status.to_string())
            }
            AppEvent::SetBrightness(percent) => self.apply(percent),
            AppEvent::Nudge(steps) => {
                let ConnectionOutcome::Connected(current) = self.status else {
                    return Some(self.status.to_string());
                };
                let target = BrightnessCalculator::new(&self.config).nudge(current, steps);
                self.apply(target)
            }
            AppEvent::Quit => None,
        }
    }

    fn apply(&mut self, requested: u8) -> Option<String> {
        if !self.status.control_enabled() {
            debug!("Ignoring brightness input, control disabled: {}", self.status);
            return Some(self.status.to_string());
        }

        let percent = BrightnessCalculator::new(&self.config).calculate(requested);
        self.session.set_normalized(percent);
        self.status = ConnectionOutcome::Connected(percent);
        Some(brightness_status(percent))
    }

    /// Close the display session
    pub fn shutdown(&mut self) {
        self.session.close();
        info!("Shut down");
    }
}

/// Forward stdin lines to the event loop until stdin closes
///
/// Reads on a dedicated thread so a pending read never holds up shutdown.
pub fn spawn_input_reader(events: mpsc::Sender<AppEvent>) {
    let spawned = std::thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        return;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                match line.parse::<AppEvent>() {
                    Ok(event) => {
                        if events.blocking_send(event).is_err() {
                            return;
                        }
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
            debug!("stdin closed, input disabled");
        });

    if let Err(e) = spawned {
        error!("Failed to spawn input thread: {}", e);
    }
}

/// Run until quit, Ctrl-C, or every event source is gone
pub async fn run<T: HidTransport>(mut app: App<T>, mut events: mpsc::Receiver<AppEvent>) {
    if let Some(line) = app.update(AppEvent::Refresh) {
        println!("{line}");
    }

    loop {
        let event = tokio::select! {
            event = events.recv() => match event {
                Some(event) => event,
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        };

        if event == AppEvent::Quit {
            break;
        }

        if let Some(line) = app.update(event) {
            println!("{line}");
        }
    }

    app.shutdown();
}
