use anyhow::bail;
use clap::Parser;
use tokio::sync::mpsc;

use crate::app::{App, AppEvent};
use crate::cli::{Cli, Command, LevelFilter};
use crate::config::Config;
use crate::devices::lg::ultrafine;
use crate::session::{DeviceSession, first_match};
use crate::transport::usb_hid::UsbHidTransport;

#[macro_use]
extern crate tracing;

mod app;
mod brightness;
mod cli;
mod config;
mod devices;
mod error;
mod hotplug;
mod session;
mod transport;

fn setup_logs(level: Option<LevelFilter>) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let default_filter = || {
        EnvFilter::new(format!(
            "warn,{}={}",
            env!("CARGO_CRATE_NAME"),
            level.map_or("warn", |level| level.as_directive())
        ))
    };
    let filter_layer = match level {
        Some(_) => default_filter(),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter()),
    };

    #[cfg(target_os = "linux")]
    if let Ok(journal_layer) = tracing_journald::layer() {
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .with(journal_layer)
            .init();
        return;
    }

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logs(cli.log_level);

    let config = Config::load(cli.config.as_deref());
    let transport = UsbHidTransport::new()?;
    let mut session = DeviceSession::new(transport, ultrafine::SPEC);

    match cli.command.unwrap_or(Command::Watch) {
        Command::List => {
            let devices = session.enumerate()?;
            let signature = session.spec().signature;
            let selected = first_match(&devices, &signature).map(|d| d.path.clone());

            for device in &devices {
                let marker = if Some(&device.path) == selected.as_ref() {
                    "*"
                } else if signature.matches(device.vendor_id, device.product.as_deref()) {
                    "+"
                } else {
                    " "
                };
                println!(
                    "{} {:04x}:{:04x} {:<40} {}",
                    marker,
                    device.vendor_id,
                    device.product_id,
                    device.product.as_deref().unwrap_or("-"),
                    device.path
                );
            }
        }
        Command::Get => {
            let mut app = App::new(session, config);
            let outcome = app.refresh();
            println!("{}", outcome);
            if !outcome.is_connected() {
                bail!("{} not available", ultrafine::SPEC.name);
            }
        }
        Command::Set { percent } => {
            let mut app = App::new(session, config);
            app.refresh();
            if let Some(line) = app.update(AppEvent::SetBrightness(percent)) {
                println!("{}", line);
            }
            if !app.status().is_connected() {
                bail!("{} not available", ultrafine::SPEC.name);
            }
        }
        Command::Watch => {
            let (tx, rx) = mpsc::channel(32);
            hotplug::spawn_hotplug_watcher(config.hotplug.clone(), tx.clone());
            app::spawn_input_reader(tx);

            app::run(App::new(session, config), rx).await;
        }
    }

    Ok(())
}
