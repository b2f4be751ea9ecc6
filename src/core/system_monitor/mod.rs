//! System monitoring core functionality.
//!
//! Collectors turn raw platform readings into immutable snapshots, the
//! scheduler drives each collector on its own cadence, and `rates` derives
//! throughput from consecutive network snapshots.

mod collector;
mod gpu;
mod metrics;
mod rates;
mod runtime;

pub use collector::{
    Collector, CollectorState, CpuCollector, DiskCollector, ErrorKind, MemoryCollector,
    NetworkCollector, ProcessCollector, Sample, SampleOutcome,
};
pub use gpu::{select_gpu_collector, GpuCollector, UnsupportedGpuCollector, GPU_UNSUPPORTED_MESSAGE};
pub use metrics::{
    CpuSnapshot, Delta, DiskSnapshot, Domain, GpuSnapshot, InterfaceRate, MemorySnapshot,
    NetworkSnapshot, ProcessSnapshot, Snapshot, VolumeMetrics, VolumeUsage,
};
pub use rates::network_delta;
pub use runtime::{Scheduler, SubsystemUpdate};
