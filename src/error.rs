use std::io;
use thiserror::Error;

/// Custom error type for the monitor
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Unsupported on this platform: {0}")]
    Unsupported(String),

    #[error("GPU not available: {0}")]
    GpuNotAvailable(String),

    #[error("Metric collection failed: {0}")]
    MetricCollection(String),
}

/// Result type alias for the monitor
pub type Result<T> = std::result::Result<T, MonitorError>;

impl MonitorError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        MonitorError::Config(msg.into())
    }

    /// Create a permission denied error
    pub fn permission_denied<S: Into<String>>(msg: S) -> Self {
        MonitorError::PermissionDenied(msg.into())
    }

    /// Create an unsupported platform error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        MonitorError::Unsupported(msg.into())
    }

    pub fn gpu_not_available<S: Into<String>>(msg: S) -> Self {
        MonitorError::GpuNotAvailable(msg.into())
    }

    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        MonitorError::MetricCollection(msg.into())
    }

    /// Whether the failure can never resolve on this host
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            MonitorError::Unsupported(_) | MonitorError::GpuNotAvailable(_)
        )
    }
}
