use std::collections::BTreeMap;
use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, MissedTickBehavior};

use crate::core::config::MonitorConfig;
use crate::core::context::GlobalContext;
use crate::core::system_monitor::{
    select_gpu_collector, CpuCollector, DiskCollector, Domain, MemoryCollector, NetworkCollector,
    ProcessCollector, Scheduler, SubsystemUpdate,
};
use crate::platform::{
    SysinfoCpuReader, SysinfoDiskReader, SysinfoMemoryReader, SysinfoNetworkReader,
    SysinfoProcessReader,
};

use super::event_handler::{key_event, mouse_event, MonitorEvent};
use super::mode::{Mode, ViewMultiplexer};
use super::panel::Panel;
use super::render::render_ui;

/// Monitor application state
pub struct MonitorApp {
    multiplexer: ViewMultiplexer,
    panels: BTreeMap<Domain, Panel>,
    pub global: GlobalContext,
    pub should_quit: bool,
    pub process_scroll: usize,
    /// Clickable panes of the last drawn frame
    pub hit_areas: Vec<(Rect, Mode)>,
    needs_redraw: bool,
}

impl MonitorApp {
    pub fn new(config: &MonitorConfig) -> Self {
        let mut app = Self {
            multiplexer: ViewMultiplexer::new(),
            panels: Domain::ALL
                .iter()
                .map(|domain| (*domain, Panel::new(*domain, config.process_limit)))
                .collect(),
            global: GlobalContext::new(config.unit_base),
            should_quit: false,
            process_scroll: 0,
            hit_areas: Vec::new(),
            needs_redraw: true,
        };
        app.sync_visibility();
        app
    }

    pub fn mode(&self) -> Mode {
        self.multiplexer.active()
    }

    pub fn panel(&self, domain: Domain) -> Option<&Panel> {
        self.panels.get(&domain)
    }

    /// Route a collector outcome to its panel
    pub fn apply_update(&mut self, update: SubsystemUpdate) {
        if let Some(panel) = self.panels.get_mut(&update.domain) {
            if panel.update(update.outcome, &self.global).is_some() {
                self.needs_redraw = true;
            }
        }
    }

    /// Handle keyboard/mouse events
    pub fn handle_event(&mut self, event: MonitorEvent) {
        match event {
            MonitorEvent::Quit => self.should_quit = true,
            MonitorEvent::SwitchMode(mode) => {
                self.multiplexer.transition(mode);
                self.process_scroll = 0;
                self.sync_visibility();
            }
            MonitorEvent::ToggleUnitBase => {
                self.global.toggle_unit_base();
                for panel in self.panels.values_mut() {
                    panel.mark_dirty();
                }
            }
            MonitorEvent::ToggleProcessSort => {
                if let Some(panel) = self.panels.get_mut(&Domain::Process) {
                    panel.toggle_sorted();
                }
            }
            MonitorEvent::TogglePause => {
                if let Some(panel) = self.panels.get_mut(&Domain::Process) {
                    let paused = panel.toggle_paused();
                    log::debug!("Process list paused: {}", paused);
                }
            }
            MonitorEvent::ScrollUp => {
                self.process_scroll = self.process_scroll.saturating_sub(1);
            }
            MonitorEvent::ScrollDown => {
                let max = self
                    .panel(Domain::Process)
                    .and_then(Panel::rendered)
                    .map(|text| text.row_count().saturating_sub(1))
                    .unwrap_or(0);
                if self.process_scroll < max {
                    self.process_scroll += 1;
                }
            }
            MonitorEvent::None => return,
        }
        self.needs_redraw = true;
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Whether a frame is due; clears the flag
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Bring the text of every visible panel up to date before drawing
    pub fn prepare_frame(&mut self) {
        for panel in self.panels.values_mut() {
            panel.refresh(&self.global);
        }
    }

    fn sync_visibility(&mut self) {
        for (domain, panel) in self.panels.iter_mut() {
            panel.set_visibility(self.multiplexer.visibility_of(*domain));
        }
    }
}

fn build_scheduler(config: &MonitorConfig) -> Scheduler {
    let cadences = &config.cadences;
    let mut scheduler = Scheduler::new();

    scheduler
        .register(
            Box::new(CpuCollector::new(SysinfoCpuReader::new())),
            cadences.for_domain(Domain::Cpu),
        )
        .register(
            Box::new(MemoryCollector::new(SysinfoMemoryReader::new())),
            cadences.for_domain(Domain::Memory),
        )
        .register(
            Box::new(NetworkCollector::new(SysinfoNetworkReader::new())),
            cadences.for_domain(Domain::Network),
        )
        .register(
            Box::new(ProcessCollector::new(SysinfoProcessReader::new())),
            cadences.for_domain(Domain::Process),
        )
        .register(
            Box::new(DiskCollector::new(SysinfoDiskReader::new())),
            cadences.for_domain(Domain::Disk),
        )
        .register(select_gpu_collector(), cadences.for_domain(Domain::Gpu));

    scheduler
}

/// Run the monitor TUI application on a single-threaded runtime
pub fn run_monitor_app(config: MonitorConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build async runtime")?;

    runtime.block_on(run_monitor_async(config))
}

async fn run_monitor_async(config: MonitorConfig) -> Result<()> {
    let (update_tx, update_rx) = mpsc::channel::<SubsystemUpdate>(64);
    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let mut app = MonitorApp::new(&config);
    let handles = build_scheduler(&config).start(update_tx, &shutdown_tx);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = event_loop(&mut terminal, &mut app, update_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    let _ = shutdown_tx.send(());
    for handle in handles {
        if let Err(e) = handle.await {
            log::warn!("Collector task ended abnormally: {}", e);
        }
    }

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut MonitorApp,
    mut update_rx: mpsc::Receiver<SubsystemUpdate>,
) -> Result<()> {
    let mut events = EventStream::new();

    // Header clock
    let mut clock = interval(Duration::from_secs(1));
    clock.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        if app.take_redraw() {
            app.prepare_frame();
            let mut hit_areas = Vec::new();
            terminal.draw(|frame| hit_areas = render_ui(frame, app))?;
            app.hit_areas = hit_areas;
        }

        tokio::select! {
            Some(update) = update_rx.recv() => {
                app.apply_update(update);
            }
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        let event = key_event(key, app.mode());
                        app.handle_event(event);
                    }
                    Some(Ok(Event::Mouse(mouse))) => {
                        let event = mouse_event(mouse, &app.hit_areas);
                        app.handle_event(event);
                    }
                    Some(Ok(Event::Resize(_, _))) => app.request_redraw(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).context("Event read failed"),
                    None => break,
                }
            }
            _ = clock.tick() => {
                app.request_redraw();
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
