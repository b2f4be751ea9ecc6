// tsmon Library - Public API

use std::fs::File;
use std::path::Path;

// Re-export error types
pub mod error;
pub use error::{MonitorError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::MonitorConfig;

/// Initialize logging.
///
/// The TUI owns the terminal, so records go to `log_file` when given
/// (Info unless `RUST_LOG` says otherwise). Without a file, logging stays
/// off unless `RUST_LOG` is set.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::new();

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .filter_level(log::LevelFilter::Info)
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if std::env::var_os("RUST_LOG").is_some() => {
            builder
                .parse_default_env()
                .target(env_logger::Target::Stderr);
        }
        None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    builder
        .try_init()
        .map_err(|e| MonitorError::config(format!("Logger already initialized: {}", e)))
}
