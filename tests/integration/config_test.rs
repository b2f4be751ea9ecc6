use std::fs;
use std::time::Duration;

use tempfile::TempDir;
use tsmon::core::config::{Cadences, MonitorConfig, DEFAULT_PROCESS_LIMIT, MIN_CADENCE_MS};
use tsmon::core::context::UnitBase;
use tsmon::core::system_monitor::Domain;
use tsmon::error::MonitorError;

#[test]
fn test_config_default() {
    let config = MonitorConfig::default();
    assert_eq!(config.unit_base, UnitBase::Binary);
    assert_eq!(config.process_limit, DEFAULT_PROCESS_LIMIT);
    assert_eq!(config.cadences, Cadences::default());
}

#[test]
fn test_default_cadence_tiers() {
    let cadences = Cadences::default();
    assert_eq!(cadences.for_domain(Domain::Cpu), Duration::from_millis(200));
    assert_eq!(cadences.for_domain(Domain::Memory), Duration::from_millis(200));
    assert_eq!(cadences.for_domain(Domain::Network), Duration::from_secs(1));
    assert_eq!(cadences.for_domain(Domain::Process), Duration::from_secs(3));
    assert_eq!(cadences.for_domain(Domain::Disk), Duration::from_secs(10));
    assert_eq!(cadences.for_domain(Domain::Gpu), Duration::from_secs(10));
}

#[test]
fn test_config_file_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");

    let config = MonitorConfig {
        process_limit: 15,
        unit_base: UnitBase::Decimal,
        cadences: Cadences {
            network_ms: 2_000,
            ..Default::default()
        },
    };
    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = MonitorConfig::load(Some(&path)).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(
        serde_json::to_value(&loaded).unwrap()["unit_base"],
        serde_json::json!(1000)
    );
}

#[test]
fn test_too_fast_cadence_is_raised() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{"cadences": {"cpu_ms": 1}}"#).unwrap();

    let loaded = MonitorConfig::load(Some(&path)).unwrap();
    assert_eq!(
        loaded.cadences.for_domain(Domain::Cpu),
        Duration::from_millis(MIN_CADENCE_MS)
    );
}

#[test]
fn test_malformed_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    let err = MonitorConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("Invalid config file"));
    assert!(matches!(
        err.downcast_ref::<MonitorError>(),
        Some(MonitorError::Serialization(_))
    ));
}
