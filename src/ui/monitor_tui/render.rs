use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::app::MonitorApp;
use super::event_handler::MODE_TRIGGERS;
use super::guide::render_guide;
use super::mode::Mode;
use super::panel::{Panel, PanelStatus, PanelView};
use super::widgets::render_text;

/// Main render function. Returns the clickable pane areas of this frame.
pub fn render_ui(frame: &mut Frame, app: &MonitorApp) -> Vec<(Rect, Mode)> {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], app);

    let hit_areas = match app.mode() {
        Mode::Main => render_main(frame, chunks[1], app),
        Mode::Guide => {
            render_guide(frame, chunks[1]);
            Vec::new()
        }
        mode => {
            render_pane(frame, chunks[1], app, mode, app.process_scroll);
            Vec::new()
        }
    };

    render_footer(frame, chunks[2], app.mode());

    hit_areas
}

fn render_header(frame: &mut Frame, area: Rect, app: &MonitorApp) {
    let clock = chrono::Local::now().format("%H:%M:%S");

    let line = Line::from(vec![
        Span::styled(
            " tsmon ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {} │ {} │ ", app.mode().title(), clock)),
        Span::styled(
            format!("Units: {}", u64::from(app.global.unit_base())),
            Style::default().fg(Color::Gray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Overview: processes on the left, a stack of compact panes on the right
fn render_main(frame: &mut Frame, area: Rect, app: &MonitorApp) -> Vec<(Rect, Mode)> {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let stack = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25), // Drives
            Constraint::Length(4),      // Memory
            Constraint::Length(5),      // CPU
            Constraint::Percentage(25), // Network
            Constraint::Min(4),         // GPU
        ])
        .split(columns[1]);

    let panes = vec![
        (columns[0], Mode::Processes),
        (stack[0], Mode::Disk),
        (stack[1], Mode::Memory),
        (stack[2], Mode::Cpu),
        (stack[3], Mode::Network),
        (stack[4], Mode::Gpu),
    ];

    for (pane_area, mode) in &panes {
        render_pane(frame, *pane_area, app, *mode, 0);
    }

    panes
}

fn pane_title(mode: Mode, panel: Option<&Panel>) -> String {
    let mut title = format!(" {} ", mode.title());

    if let Some(panel) = panel {
        match panel.status() {
            PanelStatus::Stale => title.push_str("(stale) "),
            PanelStatus::Partial => title.push_str("(partial) "),
            _ => {}
        }
        if panel.visibility() == Some(PanelView::Detailed) {
            if panel.is_paused() {
                title.push_str("[paused] ");
            }
            if !panel.is_sorted() {
                title.push_str("[unsorted] ");
            }
        }
    }

    title
}

fn render_pane(frame: &mut Frame, area: Rect, app: &MonitorApp, mode: Mode, scroll: usize) {
    let Some(domain) = mode.domain() else {
        return;
    };
    let panel = app.panel(domain);

    let border_style = match panel.map(Panel::status) {
        Some(PanelStatus::Stale) => Style::default().fg(Color::LightYellow),
        Some(PanelStatus::Unavailable) => Style::default().fg(Color::DarkGray),
        _ if app.mode() == mode => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        _ => Style::default(),
    };

    let block = Block::default()
        .title(pane_title(mode, panel))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match panel.and_then(Panel::rendered) {
        Some(text) => render_text(frame, inner, text, scroll),
        None => frame.render_widget(
            Paragraph::new("Waiting for first sample...").style(Style::default().fg(Color::DarkGray)),
            inner,
        ),
    }
}

fn render_footer(frame: &mut Frame, area: Rect, mode: Mode) {
    let mut help = String::from(" q: Quit │ b: Units");

    match mode {
        Mode::Main => {
            for (key, target) in MODE_TRIGGERS {
                help.push_str(&format!(" │ {}: {}", key, target.title()));
            }
        }
        Mode::Processes => {
            help.push_str(" │ Space: Pause │ s: Sort │ ↑/↓: Scroll │ p: Back");
        }
        other => {
            if let Some((key, _)) = MODE_TRIGGERS.iter().find(|(_, m)| *m == other) {
                help.push_str(&format!(" │ {}: Back", key));
            }
        }
    }

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
