use std::cmp::Ordering;
use std::time::Instant;

use crate::platform::{GpuAdapter, InterfaceCounters, ProcessEntry};

/// Telemetry domain sampled by one collector
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Domain {
    Cpu,
    Memory,
    Disk,
    Network,
    Process,
    Gpu,
}

impl Domain {
    pub const ALL: [Domain; 6] = [
        Domain::Cpu,
        Domain::Memory,
        Domain::Disk,
        Domain::Network,
        Domain::Process,
        Domain::Gpu,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Domain::Cpu => "CPU",
            Domain::Memory => "Memory",
            Domain::Disk => "Disk",
            Domain::Network => "Network",
            Domain::Process => "Processes",
            Domain::Gpu => "GPU",
        }
    }
}

/// Immutable point-in-time reading for one domain
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Cpu(CpuSnapshot),
    Memory(MemorySnapshot),
    Disk(DiskSnapshot),
    Network(NetworkSnapshot),
    Process(ProcessSnapshot),
    Gpu(GpuSnapshot),
}

impl Snapshot {
    pub fn domain(&self) -> Domain {
        match self {
            Snapshot::Cpu(_) => Domain::Cpu,
            Snapshot::Memory(_) => Domain::Memory,
            Snapshot::Disk(_) => Domain::Disk,
            Snapshot::Network(_) => Domain::Network,
            Snapshot::Process(_) => Domain::Process,
            Snapshot::Gpu(_) => Domain::Gpu,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuSnapshot {
    pub core_count: usize,
    pub overall_percent: f32,
    pub per_core_percent: Vec<f32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySnapshot {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub used_bytes: u64,
    pub usage_percent: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskSnapshot {
    pub volumes: Vec<VolumeMetrics>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeMetrics {
    pub device: String,
    pub mount_point: String,
    pub options: String,
    pub fs_type: String,
    pub usage: VolumeUsage,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VolumeUsage {
    Measured {
        total_bytes: u64,
        used_bytes: u64,
        free_bytes: u64,
        percent: f32,
    },
    /// Removable/optical media: only the options tag is reported
    Media,
    /// The usage read failed for this volume alone
    Unavailable { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSnapshot {
    pub taken_at: Instant,
    pub interfaces: Vec<InterfaceCounters>,
}

impl NetworkSnapshot {
    pub fn interface(&self, name: &str) -> Option<&InterfaceCounters> {
        self.interfaces.iter().find(|iface| iface.name == name)
    }
}

/// Full process table, kept in enumeration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessSnapshot {
    pub processes: Vec<ProcessEntry>,
}

impl ProcessSnapshot {
    /// Processes in display order, optionally ranked by descending CPU load
    /// and truncated to `limit`.
    pub fn listing(&self, sorted: bool, limit: Option<usize>) -> Vec<&ProcessEntry> {
        let mut entries: Vec<&ProcessEntry> = self.processes.iter().collect();

        if sorted {
            // Stable sort: equal loads keep enumeration order
            entries.sort_by(|a, b| {
                b.cpu_percent
                    .partial_cmp(&a.cpu_percent)
                    .unwrap_or(Ordering::Equal)
            });
        }

        if let Some(limit) = limit {
            entries.truncate(limit);
        }

        entries
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpuSnapshot {
    pub adapters: Vec<GpuAdapter>,
}

/// Per-second rates derived from two consecutive network snapshots
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delta {
    pub elapsed_secs: f64,
    pub rates: Vec<InterfaceRate>,
}

impl Delta {
    pub fn rate_for(&self, interface: &str) -> Option<&InterfaceRate> {
        self.rates.iter().find(|rate| rate.interface == interface)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceRate {
    pub interface: String,
    pub sent_per_sec: f64,
    pub recv_per_sec: f64,
}
