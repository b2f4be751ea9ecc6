use tsmon::core::context::{GlobalContext, UnitBase};
use tsmon::core::system_monitor::{MemorySnapshot, Snapshot};
use tsmon::ui::monitor_tui::{PanelView, RenderText};
use tsmon::ui::{classify, humanize, Band, Displayable, RenderContext};

#[test]
fn test_classify_always_in_range() {
    for p in [-1e9_f32, -0.5, 0.0, 33.3, 75.0, 90.0, 100.0, 100.5, 1e9] {
        let (clamped, _) = classify(p);
        assert!((0.0..=100.0).contains(&clamped), "{} -> {}", p, clamped);
    }
    assert_eq!(classify(-3.0).0, 0.0);
    assert_eq!(classify(130.0).0, 100.0);
}

#[test]
fn test_band_boundaries() {
    assert_eq!(classify(75.0).1, Band::Normal);
    assert_eq!(classify(75.0001).1, Band::Warning);
    assert_eq!(classify(89.999).1, Band::Warning);
    assert_eq!(classify(90.0).1, Band::Critical);
}

#[test]
fn test_humanize_examples() {
    assert_eq!(humanize(10_000.0, UnitBase::Binary), (9.8, "KiB"));
    assert_eq!(humanize(100_001_221.0, UnitBase::Binary), (95.4, "MiB"));
    assert_eq!(humanize(1_024.0, UnitBase::Binary), (1.0, "KiB"));
    assert_eq!(humanize(1_024.0, UnitBase::Decimal), (1.0, "KB"));
    assert_eq!(humanize(-1.0, UnitBase::Binary), (0.0, "B"));
    assert_eq!(humanize(-1.0, UnitBase::Decimal), (0.0, "B"));
}

#[test]
fn test_humanize_is_idempotent() {
    let first = humanize(123_456_789.0, UnitBase::Decimal);
    let second = humanize(123_456_789.0, UnitBase::Decimal);
    assert_eq!(first, second);
}

#[test]
fn test_toggle_relabels_existing_snapshot() {
    let snapshot = Snapshot::Memory(MemorySnapshot {
        total_bytes: 10_000,
        available_bytes: 10_000,
        used_bytes: 0,
        usage_percent: 0.0,
    });
    let mut global = GlobalContext::new(UnitBase::Binary);

    let render = |global: &GlobalContext| match snapshot
        .render(PanelView::Detailed, &RenderContext::new(global))
    {
        RenderText::Lines(lines) => lines[0][1].text.clone(),
        other => panic!("unexpected render {:?}", other),
    };

    assert_eq!(render(&global), "9.8 KiB");
    assert_eq!(render(&global), "9.8 KiB");
    global.toggle_unit_base();
    assert_eq!(render(&global), "10.0 KB");
}
