// Core monitoring logic

pub mod config;
pub mod context;
pub mod system_monitor;

// Re-export commonly used items
pub use config::{Cadences, MonitorConfig};
pub use context::{GlobalContext, UnitBase};
