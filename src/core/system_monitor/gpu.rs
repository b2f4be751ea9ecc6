use crate::platform::gpu::get_gpu_reader;
use crate::platform::GpuReader;

use super::collector::{read_failure, Collector, ErrorKind, Sample};
use super::metrics::{Domain, GpuSnapshot, Snapshot};

/// Text shown in place of the GPU pane when no reader exists
pub const GPU_UNSUPPORTED_MESSAGE: &str = "GPU information is not supported on this platform";

/// Samples adapter details through the platform's hardware-management interface
pub struct GpuCollector {
    reader: Box<dyn GpuReader>,
}

impl GpuCollector {
    pub fn new(reader: Box<dyn GpuReader>) -> Self {
        Self { reader }
    }
}

impl Collector for GpuCollector {
    fn domain(&self) -> Domain {
        Domain::Gpu
    }

    fn sample(&mut self, _previous: Option<&Snapshot>) -> Result<Sample, ErrorKind> {
        let adapters = self
            .reader
            .adapters()
            .map_err(|e| read_failure(Domain::Gpu, &e))?;

        Ok(Sample::new(Snapshot::Gpu(GpuSnapshot { adapters })))
    }
}

/// Stand-in for hosts without a GPU reader; every sample is `Unavailable`.
#[derive(Debug, Default)]
pub struct UnsupportedGpuCollector;

impl Collector for UnsupportedGpuCollector {
    fn domain(&self) -> Domain {
        Domain::Gpu
    }

    fn sample(&mut self, _previous: Option<&Snapshot>) -> Result<Sample, ErrorKind> {
        Err(ErrorKind::Unavailable)
    }
}

/// Pick the GPU collector once, at startup.
pub fn select_gpu_collector() -> Box<dyn Collector> {
    match get_gpu_reader() {
        Ok(reader) => Box::new(GpuCollector::new(reader)),
        Err(e) => {
            log::info!("GPU panel disabled: {}", e);
            Box::new(UnsupportedGpuCollector)
        }
    }
}
