//! Terminal User Interface for system monitoring.
//!
//! Panels hold the latest snapshot per domain, the view multiplexer decides
//! which of them are visible, and ratatui draws the result.

mod app;
mod event_handler;
mod guide;
mod mode;
mod panel;
mod render;
mod widgets;

pub use app::{run_monitor_app, MonitorApp};
pub use event_handler::{key_event, mouse_event, trigger_for, MonitorEvent, MODE_TRIGGERS};
pub use mode::{next_mode, Mode, ViewMultiplexer};
pub use panel::{Fragment, Panel, PanelStatus, PanelView, RenderText};
pub use widgets::band_color;
