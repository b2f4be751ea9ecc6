//! Snapshot to text conversion for every monitor pane.
//!
//! Output is widget-agnostic [`RenderText`]; byte quantities are humanized
//! with the unit base read from the [`GlobalContext`] at call time.

use crate::core::context::GlobalContext;
use crate::core::system_monitor::{
    CpuSnapshot, Delta, DiskSnapshot, GpuSnapshot, MemorySnapshot, NetworkSnapshot,
    ProcessSnapshot, Snapshot, VolumeMetrics, VolumeUsage,
};
use crate::platform::gpu::availability_label;
use crate::platform::{GpuAdapter, ProcessEntry};
use crate::ui::formatters::{classify, format_bytes, format_rate};
use crate::ui::monitor_tui::{Fragment, PanelView, RenderText};

const NOT_AVAILABLE: &str = "N/A";
const NO_RATE: &str = "—";

/// Everything a snapshot needs besides itself to produce text
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub global: &'a GlobalContext,
    pub delta: Option<&'a Delta>,
    /// Process listing ordered by CPU load instead of enumeration order
    pub sorted: bool,
    pub process_limit: Option<usize>,
}

impl<'a> RenderContext<'a> {
    pub fn new(global: &'a GlobalContext) -> Self {
        Self {
            global,
            delta: None,
            sorted: true,
            process_limit: None,
        }
    }
}

/// Common format-to-text capability of every snapshot type
pub trait Displayable {
    fn render(&self, view: PanelView, ctx: &RenderContext<'_>) -> RenderText;
}

impl Displayable for Snapshot {
    fn render(&self, view: PanelView, ctx: &RenderContext<'_>) -> RenderText {
        match self {
            Snapshot::Cpu(cpu) => cpu.render(view, ctx),
            Snapshot::Memory(memory) => memory.render(view, ctx),
            Snapshot::Disk(disk) => disk.render(view, ctx),
            Snapshot::Network(network) => network.render(view, ctx),
            Snapshot::Process(processes) => processes.render(view, ctx),
            Snapshot::Gpu(gpu) => gpu.render(view, ctx),
        }
    }
}

fn percent_fragment(percent: f32) -> Fragment {
    let (clamped, band) = classify(percent);
    Fragment::banded(format!("{:.1}%", clamped), band)
}

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

impl Displayable for CpuSnapshot {
    fn render(&self, view: PanelView, _ctx: &RenderContext<'_>) -> RenderText {
        let mut lines = vec![
            vec![
                Fragment::label("Cores: "),
                Fragment::plain(self.core_count.to_string()),
            ],
            vec![
                Fragment::label("Load: "),
                percent_fragment(self.overall_percent),
            ],
        ];

        match view {
            PanelView::Compact => {
                let mut row = Vec::with_capacity(self.per_core_percent.len() * 2);
                for percent in &self.per_core_percent {
                    row.push(percent_fragment(*percent));
                    row.push(Fragment::plain(" "));
                }
                row.pop();
                lines.push(row);
            }
            PanelView::Detailed => {
                lines.push(Vec::new());
                lines.extend(self.per_core_percent.iter().enumerate().map(|(i, percent)| {
                    vec![
                        Fragment::label(format!("Core {:>2}: ", i)),
                        percent_fragment(*percent),
                    ]
                }));
            }
        }

        RenderText::Lines(lines)
    }
}

impl Displayable for MemorySnapshot {
    fn render(&self, view: PanelView, ctx: &RenderContext<'_>) -> RenderText {
        let base = ctx.global.unit_base();

        match view {
            PanelView::Compact => RenderText::Lines(vec![
                vec![
                    Fragment::label("Used: "),
                    Fragment::plain(format!(
                        "{} / {}",
                        format_bytes(self.used_bytes, base),
                        format_bytes(self.total_bytes, base)
                    )),
                ],
                vec![
                    Fragment::label("Usage: "),
                    percent_fragment(self.usage_percent),
                ],
            ]),
            PanelView::Detailed => RenderText::Lines(vec![
                vec![
                    Fragment::label("Total:     "),
                    Fragment::plain(format_bytes(self.total_bytes, base)),
                ],
                vec![
                    Fragment::label("Available: "),
                    Fragment::plain(format_bytes(self.available_bytes, base)),
                ],
                vec![
                    Fragment::label("Used:      "),
                    Fragment::plain(format_bytes(self.used_bytes, base)),
                ],
                vec![
                    Fragment::label("Usage:     "),
                    percent_fragment(self.usage_percent),
                ],
            ]),
        }
    }
}

/// Windows drive roots are shown by letter only (`C:\` -> `C`)
pub fn display_device(device: &str) -> &str {
    device.strip_suffix(":\\").unwrap_or(device)
}

fn volume_row(volume: &VolumeMetrics, view: PanelView, ctx: &RenderContext<'_>) -> Vec<Fragment> {
    let base = ctx.global.unit_base();
    let device = Fragment::plain(display_device(&volume.device));
    let na = || Fragment::plain(NOT_AVAILABLE);

    match (&volume.usage, view) {
        (
            VolumeUsage::Measured {
                percent, free_bytes, ..
            },
            PanelView::Compact,
        ) => vec![
            device,
            percent_fragment(*percent),
            Fragment::plain(format_bytes(*free_bytes, base)),
        ],
        (
            VolumeUsage::Measured {
                total_bytes,
                used_bytes,
                free_bytes,
                percent,
            },
            PanelView::Detailed,
        ) => vec![
            device,
            Fragment::plain(&volume.options),
            Fragment::plain(or_na(Some(volume.fs_type.as_str()))),
            percent_fragment(*percent),
            Fragment::plain(format_bytes(*total_bytes, base)),
            Fragment::plain(format_bytes(*used_bytes, base)),
            Fragment::plain(format_bytes(*free_bytes, base)),
        ],
        (VolumeUsage::Media, PanelView::Compact) => {
            vec![device, Fragment::plain(&volume.options), na()]
        }
        (VolumeUsage::Media, PanelView::Detailed) => vec![
            device,
            Fragment::plain(&volume.options),
            na(),
            na(),
            na(),
            na(),
            na(),
        ],
        (VolumeUsage::Unavailable { .. }, PanelView::Compact) => {
            vec![device, Fragment::plain("unavailable"), na()]
        }
        (VolumeUsage::Unavailable { .. }, PanelView::Detailed) => vec![
            device,
            Fragment::plain(&volume.options),
            Fragment::plain(or_na(Some(volume.fs_type.as_str()))),
            Fragment::plain("unavailable"),
            na(),
            na(),
            na(),
        ],
    }
}

impl Displayable for DiskSnapshot {
    fn render(&self, view: PanelView, ctx: &RenderContext<'_>) -> RenderText {
        if self.volumes.is_empty() {
            return RenderText::Placeholder("No volumes mounted".to_string());
        }

        let header: &[&str] = match view {
            PanelView::Compact => &["Device", "Use", "Free"],
            PanelView::Detailed => &["Device", "Options", "FS", "Use", "Total", "Used", "Free"],
        };

        RenderText::Table {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: self
                .volumes
                .iter()
                .map(|volume| volume_row(volume, view, ctx))
                .collect(),
        }
    }
}

impl Displayable for NetworkSnapshot {
    fn render(&self, view: PanelView, ctx: &RenderContext<'_>) -> RenderText {
        if self.interfaces.is_empty() {
            return RenderText::Placeholder("No network interfaces".to_string());
        }

        let base = ctx.global.unit_base();
        let rate = |name: &str, sent: bool| -> String {
            ctx.delta
                .and_then(|delta| delta.rate_for(name))
                .map(|r| format_rate(if sent { r.sent_per_sec } else { r.recv_per_sec }, base))
                .unwrap_or_else(|| NO_RATE.to_string())
        };

        let header: &[&str] = match view {
            PanelView::Compact => &["Interface", "Down", "Up"],
            PanelView::Detailed => &["Interface", "Received", "Down", "Sent", "Up"],
        };

        let rows = self
            .interfaces
            .iter()
            .map(|iface| match view {
                PanelView::Compact => vec![
                    Fragment::plain(&iface.name),
                    Fragment::plain(rate(&iface.name, false)),
                    Fragment::plain(rate(&iface.name, true)),
                ],
                PanelView::Detailed => vec![
                    Fragment::plain(&iface.name),
                    Fragment::plain(format_bytes(iface.bytes_recv, base)),
                    Fragment::plain(rate(&iface.name, false)),
                    Fragment::plain(format_bytes(iface.bytes_sent, base)),
                    Fragment::plain(rate(&iface.name, true)),
                ],
            })
            .collect();

        RenderText::Table {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }
}

fn process_row(entry: &ProcessEntry, view: PanelView) -> Vec<Fragment> {
    let pid = Fragment::plain(entry.pid.to_string());
    let name = Fragment::plain(or_na(entry.name.as_deref()));

    match view {
        PanelView::Compact => vec![pid, name, percent_fragment(entry.cpu_percent)],
        PanelView::Detailed => vec![
            pid,
            name,
            Fragment::plain(or_na(entry.user.as_deref())),
            percent_fragment(entry.cpu_percent),
            Fragment::plain(or_na(
                entry
                    .exe
                    .as_ref()
                    .map(|exe| exe.to_string_lossy())
                    .as_deref(),
            )),
        ],
    }
}

impl Displayable for ProcessSnapshot {
    fn render(&self, view: PanelView, ctx: &RenderContext<'_>) -> RenderText {
        let header: &[&str] = match view {
            PanelView::Compact => &["PID", "Name", "CPU"],
            PanelView::Detailed => &["PID", "Name", "User", "CPU", "Executable"],
        };

        RenderText::Table {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: self
                .listing(ctx.sorted, ctx.process_limit)
                .into_iter()
                .map(|entry| process_row(entry, view))
                .collect(),
        }
    }
}

fn adapter_lines(adapter: &GpuAdapter, ctx: &RenderContext<'_>) -> Vec<Vec<Fragment>> {
    let base = ctx.global.unit_base();
    let field = |label: &str, value: String| vec![Fragment::label(format!("{:<14}", label)), Fragment::plain(value)];

    vec![
        field("Name:", or_na(Some(adapter.name.as_str()))),
        field("Driver:", or_na(adapter.driver_version.as_deref())),
        field(
            "Resolution:",
            adapter
                .resolution
                .map(|(w, h)| format!("{} x {}", w, h))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        field(
            "Adapter RAM:",
            adapter
                .adapter_ram_bytes
                .map(|bytes| format_bytes(bytes, base))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        field(
            "Availability:",
            or_na(adapter.availability.map(availability_label)),
        ),
        field(
            "Refresh rate:",
            adapter
                .refresh_rate_hz
                .map(|hz| format!("{} Hz", hz))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        field("Status:", or_na(adapter.status.as_deref())),
    ]
}

impl Displayable for GpuSnapshot {
    fn render(&self, view: PanelView, ctx: &RenderContext<'_>) -> RenderText {
        if self.adapters.is_empty() {
            return RenderText::Placeholder("No video adapters reported".to_string());
        }

        match view {
            PanelView::Compact => RenderText::Table {
                header: vec![
                    "Name".to_string(),
                    "Resolution".to_string(),
                    "Status".to_string(),
                ],
                rows: self
                    .adapters
                    .iter()
                    .map(|adapter| {
                        vec![
                            Fragment::plain(or_na(Some(adapter.name.as_str()))),
                            Fragment::plain(
                                adapter
                                    .resolution
                                    .map(|(w, h)| format!("{} x {}", w, h))
                                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                            ),
                            Fragment::plain(or_na(adapter.status.as_deref())),
                        ]
                    })
                    .collect(),
            },
            PanelView::Detailed => {
                let mut lines = Vec::new();
                for (i, adapter) in self.adapters.iter().enumerate() {
                    if i > 0 {
                        lines.push(Vec::new());
                    }
                    lines.extend(adapter_lines(adapter, ctx));
                }
                RenderText::Lines(lines)
            }
        }
    }
}
