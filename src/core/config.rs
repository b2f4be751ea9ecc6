use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::context::UnitBase;
use crate::core::system_monitor::Domain;
use crate::error::MonitorError;

/// Floor applied to every cadence
pub const MIN_CADENCE_MS: u64 = 50;

/// Rows shown in the main view's process pane
pub const DEFAULT_PROCESS_LIMIT: usize = 10;

/// Sampling interval per domain, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cadences {
    pub cpu_ms: u64,
    pub memory_ms: u64,
    pub network_ms: u64,
    pub process_ms: u64,
    pub disk_ms: u64,
    pub gpu_ms: u64,
}

impl Default for Cadences {
    fn default() -> Self {
        Self {
            cpu_ms: 200,
            memory_ms: 200,
            network_ms: 1_000,
            process_ms: 3_000,
            disk_ms: 10_000,
            gpu_ms: 10_000,
        }
    }
}

impl Cadences {
    pub fn for_domain(&self, domain: Domain) -> Duration {
        let ms = match domain {
            Domain::Cpu => self.cpu_ms,
            Domain::Memory => self.memory_ms,
            Domain::Network => self.network_ms,
            Domain::Process => self.process_ms,
            Domain::Disk => self.disk_ms,
            Domain::Gpu => self.gpu_ms,
        };
        Duration::from_millis(ms.max(MIN_CADENCE_MS))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub cadences: Cadences,
    pub process_limit: usize,
    /// Initial value only; the runtime toggle is never written back
    pub unit_base: UnitBase,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            cadences: Cadences::default(),
            process_limit: DEFAULT_PROCESS_LIMIT,
            unit_base: UnitBase::default(),
        }
    }
}

impl MonitorConfig {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields defaults; an explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let default_path = Self::default_path()?;
                if default_path.exists() {
                    Self::load_from(&default_path)
                } else {
                    log::debug!("No config file at {:?}, using defaults", default_path);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if data.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_json::from_str(&data)
            .map_err(MonitorError::from)
            .with_context(|| format!("Invalid config file: {:?}", path))?;

        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("tsmon").join("config.json"))
    }
}
