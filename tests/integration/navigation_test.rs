use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use tsmon::core::system_monitor::{
    Domain, ErrorKind, ProcessSnapshot, SampleOutcome, Snapshot, SubsystemUpdate,
};
use tsmon::platform::ProcessEntry;
use tsmon::ui::monitor_tui::{
    key_event, next_mode, Mode, MonitorApp, PanelStatus, PanelView, RenderText,
};
use tsmon::MonitorConfig;

fn press(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn send_key(app: &mut MonitorApp, c: char) {
    let event = key_event(press(c), app.mode());
    app.handle_event(event);
}

fn processes(cpu: &[(u32, f32)]) -> SubsystemUpdate {
    SubsystemUpdate {
        domain: Domain::Process,
        outcome: SampleOutcome::Fresh {
            snapshot: Arc::new(Snapshot::Process(ProcessSnapshot {
                processes: cpu
                    .iter()
                    .map(|(pid, load)| ProcessEntry {
                        pid: *pid,
                        cpu_percent: *load,
                        ..Default::default()
                    })
                    .collect(),
            })),
            delta: None,
            partial: false,
        },
    }
}

#[test]
fn test_toggle_then_direct_jump() {
    let mut app = MonitorApp::new(&MonitorConfig::default());

    send_key(&mut app, 'p');
    assert_eq!(app.mode(), Mode::Processes);
    send_key(&mut app, 'p');
    assert_eq!(app.mode(), Mode::Main);

    send_key(&mut app, 'p');
    send_key(&mut app, 'd');
    assert_eq!(app.mode(), Mode::Disk);

    send_key(&mut app, 'g');
    assert_eq!(app.mode(), Mode::Guide);
    send_key(&mut app, 'g');
    assert_eq!(app.mode(), Mode::Main);
}

#[test]
fn test_next_mode_is_total() {
    let modes = [
        Mode::Main,
        Mode::Processes,
        Mode::Cpu,
        Mode::Memory,
        Mode::Disk,
        Mode::Network,
        Mode::Gpu,
        Mode::Guide,
    ];
    for current in modes {
        for requested in modes {
            let next = next_mode(current, requested);
            if requested == current {
                assert_eq!(next, Mode::Main);
            } else {
                assert_eq!(next, requested);
            }
        }
    }
}

#[test]
fn test_only_active_panel_is_detailed() {
    let mut app = MonitorApp::new(&MonitorConfig::default());
    send_key(&mut app, 'n');

    for domain in Domain::ALL {
        let visibility = app.panel(domain).unwrap().visibility();
        if domain == Domain::Network {
            assert_eq!(visibility, Some(PanelView::Detailed));
        } else {
            assert_eq!(visibility, None);
        }
    }
}

fn first_pid(text: Option<&RenderText>) -> String {
    match text {
        Some(RenderText::Table { rows, .. }) => rows[0][0].text.clone(),
        other => panic!("unexpected render {:?}", other),
    }
}

#[test]
fn test_pause_freezes_process_view_while_scheduler_keeps_ticking() {
    let mut app = MonitorApp::new(&MonitorConfig::default());
    send_key(&mut app, 'p');
    app.apply_update(processes(&[(1, 5.0)]));

    send_key(&mut app, ' ');
    app.apply_update(processes(&[(1, 5.0), (2, 50.0)]));
    app.prepare_frame();

    let panel = app.panel(Domain::Process).unwrap();
    assert!(panel.is_paused());
    match panel.detailed_snapshot() {
        Some(Snapshot::Process(snapshot)) => assert_eq!(snapshot.processes.len(), 1),
        other => panic!("unexpected snapshot {:?}", other),
    }
    assert_eq!(panel.rendered().unwrap().row_count(), 1);

    send_key(&mut app, ' ');
    app.prepare_frame();
    let panel = app.panel(Domain::Process).unwrap();
    match panel.detailed_snapshot() {
        Some(Snapshot::Process(snapshot)) => assert_eq!(snapshot.processes.len(), 2),
        other => panic!("unexpected snapshot {:?}", other),
    }
    assert_eq!(panel.rendered().unwrap().row_count(), 2);
}

#[test]
fn test_process_toggles_stay_out_of_main_view() {
    let mut app = MonitorApp::new(&MonitorConfig::default());
    send_key(&mut app, 'p');
    app.apply_update(processes(&[(3, 10.0)]));
    send_key(&mut app, 's');
    send_key(&mut app, ' ');
    send_key(&mut app, 'p');
    assert_eq!(app.mode(), Mode::Main);

    app.apply_update(processes(&[(1, 1.0), (2, 99.0)]));
    app.prepare_frame();

    let panel = app.panel(Domain::Process).unwrap();
    assert!(panel.is_paused());
    assert!(!panel.is_sorted());
    assert_eq!(panel.visibility(), Some(PanelView::Compact));
    assert_eq!(first_pid(panel.rendered()), "2");

    // Back in the process view the frozen, unsorted list is still shown
    send_key(&mut app, 'p');
    app.prepare_frame();
    assert_eq!(
        first_pid(app.panel(Domain::Process).unwrap().rendered()),
        "3"
    );
}

#[test]
fn test_gpu_unavailable_degrades_only_its_panel() {
    let mut app = MonitorApp::new(&MonitorConfig::default());
    app.apply_update(SubsystemUpdate {
        domain: Domain::Gpu,
        outcome: SampleOutcome::Failed {
            kind: ErrorKind::Unavailable,
            last_good: None,
        },
    });
    app.apply_update(processes(&[(7, 1.0)]));

    assert_eq!(
        app.panel(Domain::Gpu).unwrap().status(),
        PanelStatus::Unavailable
    );
    assert_eq!(
        app.panel(Domain::Process).unwrap().status(),
        PanelStatus::Live
    );
}
