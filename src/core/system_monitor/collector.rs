use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::error::MonitorError;
use crate::platform::{CpuReader, DiskReader, MemoryReader, NetworkReader, ProcessReader};

use super::metrics::*;
use super::rates::network_delta;

/// How a sample attempt degraded. Never escapes a collector as a raw OS error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The domain has no data source on this host
    #[error("unavailable on this platform")]
    Unavailable,
    /// Some sub-entities failed; the rest of the sample is valid
    #[error("partially read")]
    PartialRead,
    /// This attempt failed; the next tick retries
    #[error("read failed, retrying")]
    TransientReadFailure,
}

impl From<&MonitorError> for ErrorKind {
    fn from(err: &MonitorError) -> Self {
        if err.is_permanent() {
            ErrorKind::Unavailable
        } else {
            ErrorKind::TransientReadFailure
        }
    }
}

/// Result of one successful collector invocation
#[derive(Debug, Clone)]
pub struct Sample {
    pub snapshot: Snapshot,
    pub delta: Option<Delta>,
    /// Set when some sub-entities were replaced by placeholders
    pub partial: bool,
}

impl Sample {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            delta: None,
            partial: false,
        }
    }

    pub fn with_delta(mut self, delta: Option<Delta>) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }
}

/// One telemetry domain.
///
/// `sample` must absorb every OS-access failure and report it as an
/// [`ErrorKind`]; it is given the previous snapshot for delta computation.
pub trait Collector: Send {
    fn domain(&self) -> Domain;

    fn sample(&mut self, previous: Option<&Snapshot>) -> Result<Sample, ErrorKind>;
}

/// What a tick produced, as handed to the owning panel
#[derive(Debug, Clone)]
pub enum SampleOutcome {
    Fresh {
        snapshot: Arc<Snapshot>,
        delta: Option<Delta>,
        partial: bool,
    },
    Failed {
        kind: ErrorKind,
        last_good: Option<Arc<Snapshot>>,
    },
}

/// Per-domain mutable holder, owned by the collector's task
#[derive(Debug)]
pub struct CollectorState {
    previous: Option<Arc<Snapshot>>,
    cadence: Duration,
    last_error: Option<ErrorKind>,
}

impl CollectorState {
    pub fn new(cadence: Duration) -> Self {
        Self {
            previous: None,
            cadence,
            last_error: None,
        }
    }

    pub fn previous(&self) -> Option<&Snapshot> {
        self.previous.as_deref()
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    pub fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }

    /// Store the result of one tick. Failures keep the last-known-good snapshot.
    pub fn record(&mut self, result: Result<Sample, ErrorKind>) -> SampleOutcome {
        match result {
            Ok(sample) => {
                let snapshot = Arc::new(sample.snapshot);
                self.previous = Some(Arc::clone(&snapshot));
                self.last_error = sample.partial.then_some(ErrorKind::PartialRead);

                SampleOutcome::Fresh {
                    snapshot,
                    delta: sample.delta,
                    partial: sample.partial,
                }
            }
            Err(kind) => {
                self.last_error = Some(kind);

                SampleOutcome::Failed {
                    kind,
                    last_good: self.previous.clone(),
                }
            }
        }
    }
}

pub(crate) fn read_failure(domain: Domain, err: &MonitorError) -> ErrorKind {
    log::warn!("{} read failed: {}", domain.label(), err);
    ErrorKind::from(err)
}

pub struct CpuCollector<R> {
    reader: R,
}

impl<R: CpuReader> CpuCollector<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: CpuReader> Collector for CpuCollector<R> {
    fn domain(&self) -> Domain {
        Domain::Cpu
    }

    fn sample(&mut self, _previous: Option<&Snapshot>) -> Result<Sample, ErrorKind> {
        let reading = self
            .reader
            .read()
            .map_err(|e| read_failure(Domain::Cpu, &e))?;

        let mut per_core_percent = reading.per_core_percent;
        let partial = per_core_percent.len() != reading.core_count;
        if partial {
            // Core hot-plugged between the two sub-reads
            log::debug!(
                "CPU core count changed mid-sample ({} vs {})",
                reading.core_count,
                per_core_percent.len()
            );
            per_core_percent.truncate(reading.core_count);
        }

        let snapshot = CpuSnapshot {
            core_count: per_core_percent.len(),
            overall_percent: reading.overall_percent,
            per_core_percent,
        };

        Ok(Sample::new(Snapshot::Cpu(snapshot)).with_partial(partial))
    }
}

pub struct MemoryCollector<R> {
    reader: R,
}

impl<R: MemoryReader> MemoryCollector<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: MemoryReader> Collector for MemoryCollector<R> {
    fn domain(&self) -> Domain {
        Domain::Memory
    }

    fn sample(&mut self, _previous: Option<&Snapshot>) -> Result<Sample, ErrorKind> {
        let reading = self
            .reader
            .read()
            .map_err(|e| read_failure(Domain::Memory, &e))?;

        let total = reading.total_bytes;
        let usage_percent = if total > 0 {
            (total.saturating_sub(reading.available_bytes) as f32 / total as f32) * 100.0
        } else {
            0.0
        };

        Ok(Sample::new(Snapshot::Memory(MemorySnapshot {
            total_bytes: total,
            available_bytes: reading.available_bytes,
            used_bytes: reading.used_bytes,
            usage_percent,
        })))
    }
}

pub struct DiskCollector<R> {
    reader: R,
}

impl<R: DiskReader> DiskCollector<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: DiskReader> Collector for DiskCollector<R> {
    fn domain(&self) -> Domain {
        Domain::Disk
    }

    fn sample(&mut self, _previous: Option<&Snapshot>) -> Result<Sample, ErrorKind> {
        let volumes = self
            .reader
            .volumes()
            .map_err(|e| read_failure(Domain::Disk, &e))?;

        let mut partial = false;
        let mut metrics = Vec::with_capacity(volumes.len());

        for volume in volumes {
            let usage = if volume.is_media {
                VolumeUsage::Media
            } else {
                match self.reader.usage(&volume.mount_point) {
                    Ok(reading) => {
                        let measured = reading.used_bytes + reading.free_bytes;
                        VolumeUsage::Measured {
                            total_bytes: reading.total_bytes,
                            used_bytes: reading.used_bytes,
                            free_bytes: reading.free_bytes,
                            percent: if measured > 0 {
                                (reading.used_bytes as f32 / measured as f32) * 100.0
                            } else {
                                0.0
                            },
                        }
                    }
                    Err(e) => {
                        log::debug!("Usage read failed for {}: {}", volume.device, e);
                        partial = true;
                        VolumeUsage::Unavailable {
                            reason: e.to_string(),
                        }
                    }
                }
            };

            metrics.push(VolumeMetrics {
                device: volume.device,
                mount_point: volume.mount_point.to_string_lossy().to_string(),
                options: volume.options,
                fs_type: volume.fs_type,
                usage,
            });
        }

        Ok(Sample::new(Snapshot::Disk(DiskSnapshot { volumes: metrics })).with_partial(partial))
    }
}

pub struct NetworkCollector<R> {
    reader: R,
}

impl<R: NetworkReader> NetworkCollector<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: NetworkReader> Collector for NetworkCollector<R> {
    fn domain(&self) -> Domain {
        Domain::Network
    }

    fn sample(&mut self, previous: Option<&Snapshot>) -> Result<Sample, ErrorKind> {
        let interfaces = self
            .reader
            .counters()
            .map_err(|e| read_failure(Domain::Network, &e))?;

        let snapshot = NetworkSnapshot {
            taken_at: Instant::now(),
            interfaces,
        };

        let delta = match previous {
            Some(Snapshot::Network(old)) => Some(network_delta(old, &snapshot)),
            _ => None,
        };

        Ok(Sample::new(Snapshot::Network(snapshot)).with_delta(delta))
    }
}

pub struct ProcessCollector<R> {
    reader: R,
}

impl<R: ProcessReader> ProcessCollector<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: ProcessReader> Collector for ProcessCollector<R> {
    fn domain(&self) -> Domain {
        Domain::Process
    }

    fn sample(&mut self, _previous: Option<&Snapshot>) -> Result<Sample, ErrorKind> {
        let processes = self
            .reader
            .processes()
            .map_err(|e| read_failure(Domain::Process, &e))?
            .into_iter()
            // pid 0 is the idle/swapper pseudo-process
            .filter(|entry| entry.pid > 0)
            .collect();

        Ok(Sample::new(Snapshot::Process(ProcessSnapshot { processes })))
    }
}
