use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::event_handler::MODE_TRIGGERS;
use super::mode::Mode;

fn pane_description(mode: Mode) -> &'static str {
    match mode {
        Mode::Processes => "Running processes with owner, CPU load and executable. Space pauses the list, s toggles sorting by CPU load.",
        Mode::Cpu => "Logical core count, overall load and the load of every core.",
        Mode::Memory => "Physical memory totals and the share currently in use.",
        Mode::Disk => "Mounted volumes with their options, filesystem and usage. Removable media only report options.",
        Mode::Network => "Bytes sent and received per interface, with throughput once two samples exist.",
        Mode::Gpu => "Video adapters with driver, resolution, memory, availability, refresh rate and status.",
        Mode::Guide => "This page.",
        Mode::Main => "",
    }
}

/// Static description of every pane and its trigger key
pub fn render_guide(frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Every pane refreshes on its own schedule, even while hidden.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    for (key, mode) in MODE_TRIGGERS {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {}  {:<10}", key, mode.title()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(pane_description(mode)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(
        " b  toggles byte units between 1000 (KB, MB) and 1024 (KiB, MiB).",
    ));
    lines.push(Line::from(
        " Pressing a pane's key again, or clicking a pane on the overview, switches views.",
    ));
    lines.push(Line::from(" q / Esc quits."));

    let block = Block::default()
        .title(" Guide ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
