//! System monitor command handler.
//!
//! Provides real-time system monitoring in a TUI dashboard.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};

use crate::core::config::MonitorConfig;
use crate::core::context::UnitBase;
use crate::ui::monitor_tui::run_monitor_app;

/// Command-line definition of the monitor
pub fn command() -> Command {
    Command::new("tsmon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Live terminal system monitor")
        .long_about(
            "Live terminal system monitor\n\n\
             Samples CPU, memory, disks, network, GPU and processes on independent \
             schedules. Press g inside the monitor for a guide to every pane.",
        )
        .arg(
            Arg::new("base")
                .long("base")
                .value_name("1000|1024")
                .help("Initial byte unit base (toggle at runtime with b)")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("top")
                .long("top")
                .value_name("N")
                .help("Processes shown in the overview pane")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Read settings from this JSON file instead of the default location")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .help("Write logs to this file (RUST_LOG sets the level)")
                .value_parser(value_parser!(PathBuf)),
        )
}

/// Merge the config file with command-line overrides
pub fn build_config(matches: &ArgMatches) -> Result<MonitorConfig> {
    let config_path = matches.get_one::<PathBuf>("config");
    let mut config = MonitorConfig::load(config_path.map(PathBuf::as_path))?;

    if let Some(base) = matches.get_one::<u64>("base") {
        config.unit_base = UnitBase::try_from(*base).map_err(|e| anyhow!(e))?;
    }

    if let Some(top) = matches.get_one::<usize>("top") {
        config.process_limit = *top;
    }

    Ok(config)
}

/// Execute the monitor command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = build_config(matches)?;
    log::info!("Starting monitor with {:?}", config);

    run_monitor_app(config).context("Failed to run system monitor")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"unit_base": 1024, "process_limit": 5}}"#).expect("write");
        let path = file.path().to_string_lossy().to_string();

        let matches = command()
            .try_get_matches_from(["tsmon", "--config", &path, "--base", "1000"])
            .expect("valid args");
        let config = build_config(&matches).expect("config");

        assert_eq!(config.unit_base, UnitBase::Decimal);
        assert_eq!(config.process_limit, 5);
    }

    #[test]
    fn test_invalid_base_rejected() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let path = file.path().to_string_lossy().to_string();

        let matches = command()
            .try_get_matches_from(["tsmon", "--config", &path, "--base", "1023"])
            .expect("valid args");
        assert!(build_config(&matches).is_err());
    }

    #[test]
    fn test_top_flag() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let path = file.path().to_string_lossy().to_string();

        let matches = command()
            .try_get_matches_from(["tsmon", "--config", &path, "--top", "25"])
            .expect("valid args");
        assert_eq!(build_config(&matches).expect("config").process_limit, 25);
    }

    #[test]
    fn test_command_definition() {
        command().debug_assert();
    }
}
