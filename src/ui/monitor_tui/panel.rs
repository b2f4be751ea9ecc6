use std::sync::Arc;

use crate::core::context::GlobalContext;
use crate::core::system_monitor::{Delta, Domain, ErrorKind, SampleOutcome, Snapshot};
use crate::core::system_monitor::GPU_UNSUPPORTED_MESSAGE;
use crate::ui::formatters::Band;
use crate::ui::system_formatters::{Displayable, RenderContext};

/// How much of a domain a visible panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelView {
    /// One pane of the main view
    Compact,
    /// The domain's own full-screen mode
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStatus {
    /// No sample has arrived yet
    Waiting,
    Live,
    /// Showing valid sub-entities next to placeholders for failed ones
    Partial,
    /// Last read failed; still showing the last good snapshot
    Stale,
    /// The domain has no data source here
    Unavailable,
}

/// One piece of styled text. The renderer maps `band` to a color.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fragment {
    pub text: String,
    pub band: Option<Band>,
    /// Labels and headings
    pub accent: bool,
}

impl Fragment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn banded(text: impl Into<String>, band: Band) -> Self {
        Self {
            text: text.into(),
            band: Some(band),
            accent: false,
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            band: None,
            accent: true,
        }
    }
}

/// Presentation-ready output of a panel, independent of any widget library
#[derive(Debug, Clone, PartialEq)]
pub enum RenderText {
    Lines(Vec<Vec<Fragment>>),
    Table {
        header: Vec<String>,
        rows: Vec<Vec<Fragment>>,
    },
    Placeholder(String),
}

impl RenderText {
    /// Number of body rows, used to bound scrolling
    pub fn row_count(&self) -> usize {
        match self {
            RenderText::Lines(lines) => lines.len(),
            RenderText::Table { rows, .. } => rows.len(),
            RenderText::Placeholder(_) => 1,
        }
    }
}

/// Latest state for one domain plus its presentation toggles.
///
/// Panels are fed by [`Panel::update`] and only produce text while visible.
/// A hidden panel keeps absorbing samples and re-renders when shown again.
#[derive(Debug)]
pub struct Panel {
    domain: Domain,
    latest: Option<Arc<Snapshot>>,
    /// What the detailed view keeps showing while paused
    frozen: Option<Arc<Snapshot>>,
    delta: Option<Delta>,
    status: PanelStatus,
    visibility: Option<PanelView>,
    paused: bool,
    sorted: bool,
    compact_limit: usize,
    rendered: Option<RenderText>,
    dirty: bool,
}

impl Panel {
    pub fn new(domain: Domain, compact_limit: usize) -> Self {
        Self {
            domain,
            latest: None,
            frozen: None,
            delta: None,
            status: PanelStatus::Waiting,
            visibility: None,
            paused: false,
            sorted: true,
            compact_limit,
            rendered: None,
            dirty: true,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn status(&self) -> PanelStatus {
        self.status
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.latest.as_deref()
    }

    /// Snapshot behind the detailed view: frozen at pause time while paused
    pub fn detailed_snapshot(&self) -> Option<&Snapshot> {
        if self.paused {
            self.frozen.as_deref()
        } else {
            self.latest.as_deref()
        }
    }

    pub fn visibility(&self) -> Option<PanelView> {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_some()
    }

    pub fn set_visibility(&mut self, visibility: Option<PanelView>) {
        if self.visibility != visibility {
            self.visibility = visibility;
            self.dirty = true;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_paused(&mut self) -> bool {
        self.paused = !self.paused;
        self.frozen = if self.paused { self.latest.clone() } else { None };
        self.dirty = true;
        self.paused
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    pub fn toggle_sorted(&mut self) -> bool {
        self.sorted = !self.sorted;
        self.dirty = true;
        self.sorted
    }

    /// Force a re-render on next refresh, e.g. after the unit base changed
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Apply one collector outcome.
    ///
    /// Returns fresh text only when the panel is visible. Pausing only holds
    /// the detailed view; the compact pane keeps following new samples.
    pub fn update(&mut self, outcome: SampleOutcome, global: &GlobalContext) -> Option<RenderText> {
        let fresh = matches!(outcome, SampleOutcome::Fresh { .. });

        match outcome {
            SampleOutcome::Fresh {
                snapshot,
                delta,
                partial,
            } => {
                self.latest = Some(snapshot);
                self.delta = delta;
                self.status = if partial {
                    PanelStatus::Partial
                } else {
                    PanelStatus::Live
                };
            }
            SampleOutcome::Failed { kind, last_good } => {
                self.status = match kind {
                    ErrorKind::Unavailable => PanelStatus::Unavailable,
                    ErrorKind::PartialRead => PanelStatus::Partial,
                    ErrorKind::TransientReadFailure => PanelStatus::Stale,
                };
                if self.latest.is_none() {
                    self.latest = last_good;
                }
            }
        }

        if fresh && self.paused && self.visibility == Some(PanelView::Detailed) {
            // Frozen view; nothing on screen changes
            return None;
        }

        self.dirty = true;
        if self.refresh(global) {
            self.rendered.clone()
        } else {
            None
        }
    }

    /// Re-render if visible and something changed. Returns whether it did.
    pub fn refresh(&mut self, global: &GlobalContext) -> bool {
        if !self.dirty || !self.is_visible() {
            return false;
        }
        self.rendered = Some(self.render(global));
        self.dirty = false;
        true
    }

    /// Last text produced while visible
    pub fn rendered(&self) -> Option<&RenderText> {
        self.rendered.as_ref()
    }

    pub fn render(&self, global: &GlobalContext) -> RenderText {
        let view = self.visibility.unwrap_or(PanelView::Compact);

        if self.status == PanelStatus::Unavailable {
            return RenderText::Placeholder(unavailable_message(self.domain));
        }

        let snapshot = match view {
            PanelView::Compact => self.latest(),
            PanelView::Detailed => self.detailed_snapshot(),
        };

        match snapshot {
            None => RenderText::Placeholder("Waiting for first sample...".to_string()),
            Some(snapshot) => {
                let ctx = RenderContext {
                    global,
                    delta: self.delta.as_ref(),
                    // The overview pane is always the top processes by load
                    sorted: self.sorted || view == PanelView::Compact,
                    process_limit: match view {
                        PanelView::Compact => Some(self.compact_limit),
                        PanelView::Detailed => None,
                    },
                };
                snapshot.render(view, &ctx)
            }
        }
    }
}

fn unavailable_message(domain: Domain) -> String {
    match domain {
        Domain::Gpu => GPU_UNSUPPORTED_MESSAGE.to_string(),
        other => format!("{} information is not available on this system", other.label()),
    }
}
