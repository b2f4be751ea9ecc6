//! GPU-specific platform code.
//!
//! Adapter details come from the WMI `Win32_VideoController` class, which only
//! exists on Windows. Other platforms have no reader at all.

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use windows::WmiGpuReader;

use super::GpuReader;
use crate::error::Result;
#[cfg(not(windows))]
use crate::error::MonitorError;

/// Attempt to get the GPU reader for this platform.
///
/// Returns an error on platforms without a hardware-management interface;
/// callers treat that as permanent.
pub fn get_gpu_reader() -> Result<Box<dyn GpuReader>> {
    #[cfg(windows)]
    {
        Ok(Box::new(WmiGpuReader::new()))
    }

    #[cfg(not(windows))]
    {
        Err(MonitorError::unsupported(
            "GPU information is only available through WMI on Windows",
        ))
    }
}

/// Text for a CIM `Availability` code
pub fn availability_label(code: u16) -> &'static str {
    match code {
        1 => "Other",
        2 => "Unknown",
        3 => "Running/Full Power",
        4 => "Warning",
        5 => "In Test",
        6 => "Not Applicable",
        7 => "Power Off",
        8 => "Off Line",
        9 => "Off Duty",
        10 => "Degraded",
        11 => "Not Installed",
        12 => "Install Error",
        13 => "Power Save - Unknown",
        14 => "Power Save - Low Power Mode",
        15 => "Power Save - Standby",
        16 => "Power Cycle",
        17 => "Power Save - Warning",
        18 => "Paused",
        19 => "Not Ready",
        20 => "Not Configured",
        21 => "Quiesced",
        _ => "Unknown",
    }
}
