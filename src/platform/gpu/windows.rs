use serde::Deserialize;
use wmi::WMIConnection;

use crate::error::{MonitorError, Result};
use crate::platform::{GpuAdapter, GpuReader};

#[derive(Deserialize, Debug)]
#[serde(rename = "Win32_VideoController")]
#[serde(rename_all = "PascalCase")]
struct Win32VideoController {
    name: Option<String>,
    driver_version: Option<String>,
    current_horizontal_resolution: Option<u32>,
    current_vertical_resolution: Option<u32>,
    #[serde(rename = "AdapterRAM")]
    adapter_ram: Option<u32>,
    availability: Option<u16>,
    current_refresh_rate: Option<u32>,
    status: Option<String>,
}

/// Reads video controllers through WMI.
///
/// The connection is opened per read: it is not `Send` and the GPU cadence is slow.
#[derive(Debug, Default)]
pub struct WmiGpuReader;

impl WmiGpuReader {
    pub fn new() -> Self {
        Self
    }
}

impl GpuReader for WmiGpuReader {
    fn adapters(&mut self) -> Result<Vec<GpuAdapter>> {
        let wmi_con = WMIConnection::new()
            .map_err(|e| MonitorError::metric_collection(format!("Failed to connect to WMI: {}", e)))?;

        let controllers: Vec<Win32VideoController> = wmi_con
            .query()
            .map_err(|e| MonitorError::metric_collection(format!("WMI query failed: {}", e)))?;

        Ok(controllers
            .into_iter()
            .map(|gpu| GpuAdapter {
                name: gpu.name.unwrap_or_default(),
                driver_version: gpu.driver_version,
                resolution: gpu
                    .current_horizontal_resolution
                    .zip(gpu.current_vertical_resolution),
                adapter_ram_bytes: gpu.adapter_ram.map(u64::from),
                availability: gpu.availability,
                refresh_rate_hz: gpu.current_refresh_rate,
                status: gpu.status,
            })
            .collect())
    }
}
