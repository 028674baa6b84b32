use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::app::AppEvent;
use crate::config::HotplugConfig;

/// Start automatic HID hotplug detection
///
/// Uses a dedicated blocking thread for udev monitoring because MonitorSocket is not Send.
/// Raw events reach [`debounce`] through a channel, which posts
/// `AppEvent::TopologyChanged` to the event loop. The session itself is never
/// touched from here.
pub fn spawn_hotplug_watcher(config: HotplugConfig, events: mpsc::Sender<AppEvent>) {
    #[cfg(all(target_os = "linux", feature = "udev-hotplug"))]
    {
        let (tx, rx) = mpsc::channel(100);

        let spawned = std::thread::Builder::new()
            .name("udev-hotplug".to_string())
            .spawn(move || {
                let monitor = match super::udev_monitor::UdevMonitor::new() {
                    Ok(m) => m,
                    Err(e) => {
                        error!("Failed to initialize HID hotplug monitoring: {}", e);
                        return;
                    }
                };

                let _err = monitor.run(|_event| match tx.try_send(()) {
                    Ok(_) => true,
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        debug!("Hotplug channel full, skipping event (will debounce)");
                        true
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        error!("Hotplug channel closed, stopping monitor");
                        false
                    }
                });

                error!("HID hotplug monitoring stopped");
            });

        match spawned {
            Ok(_) => {
                tokio::spawn(debounce(rx, events, config));
            }
            Err(e) => error!("Failed to spawn hotplug thread: {}", e),
        }
    }

    #[cfg(not(all(target_os = "linux", feature = "udev-hotplug")))]
    {
        let _ = (config, events);
        warn!("Hotplug detection is not available in this build, use `refresh` after plugging the display");
    }
}

/// Collapse bursts of raw hotplug events into single re-scan requests
///
/// Waits `settle_ms` after an event for the device node to appear, drops
/// everything that arrived meanwhile, and keeps re-scans at least
/// `debounce_ms` apart.
pub async fn debounce(
    mut raw: mpsc::Receiver<()>,
    events: mpsc::Sender<AppEvent>,
    config: HotplugConfig,
) {
    let rate_limit = Duration::from_millis(config.debounce_ms);
    let settle = Duration::from_millis(config.settle_ms);
    let mut last_rescan: Option<Instant> = None;

    while raw.recv().await.is_some() {
        debug!("Hotplug event received, debouncing...");

        if let Some(last) = last_rescan {
            let elapsed = last.elapsed();
            if elapsed < rate_limit {
                let additional_wait = rate_limit - elapsed;
                debug!("Rate limiting: waiting additional {:?} before re-scan", additional_wait);
                tokio::time::sleep(additional_wait).await;
            }
        }

        tokio::time::sleep(settle).await;

        let mut drained_count = 0;
        while raw.try_recv().is_ok() {
            drained_count += 1;
        }
        if drained_count > 0 {
            debug!("Drained {} additional hotplug events", drained_count);
        }

        last_rescan = Some(Instant::now());

        info!("Hotplug settled, requesting re-scan");
        if events.send(AppEvent::TopologyChanged).await.is_err() {
            debug!("Event loop gone, stopping hotplug forwarding");
            return;
        }
    }

    info!("Hotplug monitoring channel closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn immediate() -> HotplugConfig {
        HotplugConfig {
            debounce_ms: 0,
            settle_ms: 0,
        }
    }

    #[tokio::test]
    async fn test_burst_collapses_into_one_rescan() {
        let (raw_tx, raw_rx) = mpsc::channel(10);
        let (events_tx, mut events_rx) = mpsc::channel(10);

        for _ in 0..3 {
            raw_tx.send(()).await.unwrap();
        }
        drop(raw_tx);

        debounce(raw_rx, events_tx, immediate()).await;

        assert_eq!(events_rx.recv().await, Some(AppEvent::TopologyChanged));
        assert_eq!(events_rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_stops_when_event_loop_is_gone() {
        let (raw_tx, raw_rx) = mpsc::channel(10);
        let (events_tx, events_rx) = mpsc::channel(10);
        drop(events_rx);

        raw_tx.send(()).await.unwrap();

        // returns even though the raw sender is still alive
        debounce(raw_rx, events_tx, immediate()).await;
    }
}
