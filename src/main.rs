use anyhow::{Context, Result};
use std::path::PathBuf;

use tsmon::commands::monitor;

fn main() -> Result<()> {
    let matches = monitor::command().get_matches();

    let log_file = matches.get_one::<PathBuf>("log-file");
    tsmon::init_logging(log_file.map(PathBuf::as_path)).context("Failed to initialize logging")?;

    monitor::execute(&matches)
}
