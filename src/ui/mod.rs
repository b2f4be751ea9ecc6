// UI and formatting module

pub mod formatters;
pub mod monitor_tui;
pub mod system_formatters;

// Re-export commonly used items for cleaner imports
pub use formatters::{classify, format_bytes, format_percent, format_rate, humanize, Band};
pub use system_formatters::{Displayable, RenderContext};
