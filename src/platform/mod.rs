//! OS accessor boundary.
//!
//! Each trait is the raw read a collector performs for one domain. The
//! production implementations live in [`sysinfo_readers`] and [`gpu`]; tests
//! substitute fakes. Readers report failures as [`MonitorError`] and never
//! panic.

pub mod gpu;
pub mod sysinfo_readers;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use sysinfo_readers::{
    SysinfoCpuReader, SysinfoDiskReader, SysinfoMemoryReader, SysinfoNetworkReader,
    SysinfoProcessReader,
};

/// Aggregate and per-core load taken in one read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuReading {
    pub core_count: usize,
    pub overall_percent: f32,
    pub per_core_percent: Vec<f32>,
}

pub trait CpuReader: Send {
    fn read(&mut self) -> Result<CpuReading>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryReading {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub used_bytes: u64,
}

pub trait MemoryReader: Send {
    fn read(&mut self) -> Result<MemoryReading>;
}

/// A mounted volume as enumerated, before any usage read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeInfo {
    pub device: String,
    pub mount_point: PathBuf,
    pub fs_type: String,
    pub options: String,
    /// Removable or optical media; never measured
    pub is_media: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageReading {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
}

pub trait DiskReader: Send {
    fn volumes(&mut self) -> Result<Vec<VolumeInfo>>;
    fn usage(&mut self, mount_point: &Path) -> Result<UsageReading>;
}

/// Cumulative byte counters for one interface since boot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceCounters {
    pub name: String,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

pub trait NetworkReader: Send {
    fn counters(&mut self) -> Result<Vec<InterfaceCounters>>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: Option<String>,
    pub user: Option<String>,
    pub exe: Option<PathBuf>,
    pub cpu_percent: f32,
}

pub trait ProcessReader: Send {
    /// Full table in enumeration (ascending pid) order
    fn processes(&mut self) -> Result<Vec<ProcessEntry>>;
}

/// One video adapter as reported by the hardware-management interface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpuAdapter {
    pub name: String,
    pub driver_version: Option<String>,
    pub resolution: Option<(u32, u32)>,
    pub adapter_ram_bytes: Option<u64>,
    pub availability: Option<u16>,
    pub refresh_rate_hz: Option<u32>,
    pub status: Option<String>,
}

pub trait GpuReader: Send {
    fn adapters(&mut self) -> Result<Vec<GpuAdapter>>;
}
