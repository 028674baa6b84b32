use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(about, version)]
pub struct Cli {
    /// Minimum log level to print out, overrides RUST_LOG
    #[clap(long, value_enum)]
    pub log_level: Option<LevelFilter>,

    /// Location of the configuration file on disk
    #[clap(long)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Keep the display connected across hotplug and read levels from stdin (default)
    Watch,
    /// Print the current brightness
    Get,
    /// Set the brightness
    Set {
        /// Brightness in percent
        #[clap(value_parser = clap::value_parser!(u8).range(0..=100))]
        percent: u8,
    },
    /// List HID devices and show which one would be used
    List,
}

#[derive(ValueEnum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum LevelFilter {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LevelFilter {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            LevelFilter::Off => "off",
            LevelFilter::Error => "error",
            LevelFilter::Warn => "warn",
            LevelFilter::Info => "info",
            LevelFilter::Debug => "debug",
            LevelFilter::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::try_parse_from(["lg-ultrafine-brightness"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.log_level, None);
    }

    #[test]
    fn test_set_range() {
        let cli = Cli::try_parse_from(["lg-ultrafine-brightness", "set", "40"]).unwrap();
        assert_eq!(cli.command, Some(Command::Set { percent: 40 }));

        assert!(Cli::try_parse_from(["lg-ultrafine-brightness", "set", "101"]).is_err());
    }

    #[test]
    fn test_log_level() {
        let cli =
            Cli::try_parse_from(["lg-ultrafine-brightness", "--log-level", "debug", "get"]).unwrap();
        assert_eq!(cli.log_level, Some(LevelFilter::Debug));
        assert_eq!(cli.command, Some(Command::Get));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
