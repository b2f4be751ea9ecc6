use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use super::mode::Mode;

/// Key that toggles each non-Main mode
pub const MODE_TRIGGERS: [(char, Mode); 7] = [
    ('p', Mode::Processes),
    ('c', Mode::Cpu),
    ('m', Mode::Memory),
    ('d', Mode::Disk),
    ('n', Mode::Network),
    ('v', Mode::Gpu),
    ('g', Mode::Guide),
];

/// Events that can occur in the monitor TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Quit the application
    Quit,
    /// Toggle between Main and the given mode
    SwitchMode(Mode),
    /// Flip between 1000 and 1024 byte units
    ToggleUnitBase,
    /// Toggle process sort mode
    ToggleProcessSort,
    /// Freeze or resume the process list
    TogglePause,
    /// Navigate process list up
    ScrollUp,
    /// Navigate process list down
    ScrollDown,
    /// No action
    None,
}

pub fn trigger_for(key: char) -> Option<Mode> {
    MODE_TRIGGERS
        .iter()
        .find(|(trigger, _)| *trigger == key)
        .map(|(_, mode)| *mode)
}

/// Map a key press to an event. Process-list controls only apply in the Processes view.
pub fn key_event(key: KeyEvent, active: Mode) -> MonitorEvent {
    if key.kind != KeyEventKind::Press {
        return MonitorEvent::None;
    }

    let in_processes = active == Mode::Processes;

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => MonitorEvent::Quit,
        KeyCode::Char('b') => MonitorEvent::ToggleUnitBase,
        KeyCode::Char('s') if in_processes => MonitorEvent::ToggleProcessSort,
        KeyCode::Char(' ') if in_processes => MonitorEvent::TogglePause,
        KeyCode::Up | KeyCode::Char('k') if in_processes => MonitorEvent::ScrollUp,
        KeyCode::Down | KeyCode::Char('j') if in_processes => MonitorEvent::ScrollDown,
        KeyCode::Char(c) => trigger_for(c)
            .map(MonitorEvent::SwitchMode)
            .unwrap_or(MonitorEvent::None),
        _ => MonitorEvent::None,
    }
}

/// Map a left click to the pane under the cursor, using the areas of the last frame
pub fn mouse_event(mouse: MouseEvent, hit_areas: &[(Rect, Mode)]) -> MonitorEvent {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let position = Position::new(mouse.column, mouse.row);
            hit_areas
                .iter()
                .find(|(area, _)| area.contains(position))
                .map(|(_, mode)| MonitorEvent::SwitchMode(*mode))
                .unwrap_or(MonitorEvent::None)
        }
        MouseEventKind::ScrollUp => MonitorEvent::ScrollUp,
        MouseEventKind::ScrollDown => MonitorEvent::ScrollDown,
        _ => MonitorEvent::None,
    }
}
