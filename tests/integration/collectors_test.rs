use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tokio::sync::{broadcast, mpsc};
use tsmon::core::system_monitor::{
    network_delta, Collector, DiskCollector, NetworkSnapshot, SampleOutcome, Scheduler, Snapshot,
    VolumeUsage,
};
use tsmon::error::{MonitorError, Result};
use tsmon::platform::{DiskReader, InterfaceCounters, UsageReading, VolumeInfo};

struct LockedVolume;

impl DiskReader for LockedVolume {
    fn volumes(&mut self) -> Result<Vec<VolumeInfo>> {
        Ok(["/", "/root", "/home"]
            .iter()
            .map(|mount| VolumeInfo {
                device: format!("dev{}", mount),
                mount_point: PathBuf::from(mount),
                fs_type: "ext4".to_string(),
                options: "ssd".to_string(),
                is_media: false,
            })
            .collect())
    }

    fn usage(&mut self, mount_point: &Path) -> Result<UsageReading> {
        if mount_point == Path::new("/root") {
            return Err(MonitorError::permission_denied("/root"));
        }
        Ok(UsageReading {
            total_bytes: 1_000,
            used_bytes: 250,
            free_bytes: 750,
        })
    }
}

#[test]
fn test_one_locked_volume_keeps_the_rest() {
    let mut collector = DiskCollector::new(LockedVolume);
    let sample = collector.sample(None).unwrap();
    assert!(sample.partial);

    let Snapshot::Disk(disk) = sample.snapshot else {
        panic!("expected a disk snapshot");
    };
    let measured: Vec<&str> = disk
        .volumes
        .iter()
        .filter(|v| matches!(v.usage, VolumeUsage::Measured { .. }))
        .map(|v| v.mount_point.as_str())
        .collect();
    assert_eq!(measured, vec!["/", "/home"]);
    assert!(matches!(
        disk.volumes[1].usage,
        VolumeUsage::Unavailable { .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_locked_volume_through_scheduler() {
    let (update_tx, mut update_rx) = mpsc::channel(8);
    let (shutdown_tx, _) = broadcast::channel(1);

    let mut scheduler = Scheduler::new();
    scheduler.register(Box::new(DiskCollector::new(LockedVolume)), Duration::from_secs(10));
    let handles = scheduler.start(update_tx, &shutdown_tx);

    let update = update_rx.recv().await.unwrap();
    match update.outcome {
        SampleOutcome::Fresh { partial, .. } => assert!(partial),
        other => panic!("unexpected outcome {:?}", other),
    }

    shutdown_tx.send(()).unwrap();
    for handle in handles {
        handle.await.unwrap();
    }
}

fn counters(name: &str, sent: u64, recv: u64) -> InterfaceCounters {
    InterfaceCounters {
        name: name.to_string(),
        bytes_sent: sent,
        bytes_recv: recv,
    }
}

#[test]
fn test_network_delta_example() {
    let start = Instant::now();
    let old = NetworkSnapshot {
        taken_at: start,
        interfaces: vec![counters("eth0", 100, 200)],
    };
    let new = NetworkSnapshot {
        taken_at: start + Duration::from_secs(1),
        interfaces: vec![counters("eth0", 150, 260)],
    };

    let delta = network_delta(&old, &new);
    let rate = delta.rate_for("eth0").unwrap();
    assert_eq!(rate.sent_per_sec, 50.0);
    assert_eq!(rate.recv_per_sec, 60.0);

    let reset = NetworkSnapshot {
        taken_at: start + Duration::from_secs(2),
        interfaces: vec![counters("eth0", 200, 10)],
    };
    let rate = network_delta(&new, &reset).rates[0].clone();
    assert_eq!(rate.recv_per_sec, 0.0);
    assert_eq!(rate.sent_per_sec, 50.0);
}
