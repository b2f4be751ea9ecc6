//! Foreground view selection.

use crate::core::system_monitor::Domain;

use super::panel::PanelView;

/// The view currently occupying the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Main,
    Processes,
    Cpu,
    Memory,
    Disk,
    Network,
    Gpu,
    Guide,
}

impl Mode {
    /// Domain shown in detail by this mode, if any
    pub fn domain(self) -> Option<Domain> {
        match self {
            Mode::Processes => Some(Domain::Process),
            Mode::Cpu => Some(Domain::Cpu),
            Mode::Memory => Some(Domain::Memory),
            Mode::Disk => Some(Domain::Disk),
            Mode::Network => Some(Domain::Network),
            Mode::Gpu => Some(Domain::Gpu),
            Mode::Main | Mode::Guide => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Main => "Overview",
            Mode::Processes => "Processes",
            Mode::Cpu => "CPU",
            Mode::Memory => "Memory",
            Mode::Disk => "Drives",
            Mode::Network => "Network",
            Mode::Gpu => "GPU",
            Mode::Guide => "Guide",
        }
    }
}

/// Toggle semantics: requesting the active mode returns to Main, anything
/// else jumps directly.
pub fn next_mode(current: Mode, requested: Mode) -> Mode {
    if requested == current {
        Mode::Main
    } else {
        requested
    }
}

/// Owns the active mode and derives each panel's visibility from it
#[derive(Debug, Clone, Default)]
pub struct ViewMultiplexer {
    active: Mode,
}

impl ViewMultiplexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Mode {
        self.active
    }

    pub fn transition(&mut self, requested: Mode) -> Mode {
        let next = next_mode(self.active, requested);
        if next != self.active {
            log::debug!("Mode {:?} -> {:?}", self.active, next);
        }
        self.active = next;
        next
    }

    pub fn visibility_of(&self, domain: Domain) -> Option<PanelView> {
        match self.active {
            Mode::Main => Some(PanelView::Compact),
            Mode::Guide => None,
            mode if mode.domain() == Some(domain) => Some(PanelView::Detailed),
            _ => None,
        }
    }
}
