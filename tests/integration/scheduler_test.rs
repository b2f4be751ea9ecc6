use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;
use tsmon::core::system_monitor::{
    Collector, CpuSnapshot, Domain, ErrorKind, Sample, SampleOutcome, Scheduler, Snapshot,
    SubsystemUpdate,
};

struct Steady(Domain);

impl Collector for Steady {
    fn domain(&self) -> Domain {
        self.0
    }

    fn sample(&mut self, _previous: Option<&Snapshot>) -> Result<Sample, ErrorKind> {
        Ok(Sample::new(Snapshot::Cpu(CpuSnapshot::default())))
    }
}

struct AlwaysFailing;

impl Collector for AlwaysFailing {
    fn domain(&self) -> Domain {
        Domain::Network
    }

    fn sample(&mut self, _previous: Option<&Snapshot>) -> Result<Sample, ErrorKind> {
        Err(ErrorKind::TransientReadFailure)
    }
}

struct Panicking;

impl Collector for Panicking {
    fn domain(&self) -> Domain {
        Domain::Gpu
    }

    fn sample(&mut self, _previous: Option<&Snapshot>) -> Result<Sample, ErrorKind> {
        panic!("driver crashed");
    }
}

/// Records the clock reading of every sample it takes
struct Stamping {
    start: Instant,
    stamps: Arc<Mutex<Vec<Duration>>>,
}

impl Collector for Stamping {
    fn domain(&self) -> Domain {
        Domain::Process
    }

    fn sample(&mut self, _previous: Option<&Snapshot>) -> Result<Sample, ErrorKind> {
        self.stamps.lock().unwrap().push(self.start.elapsed());
        Ok(Sample::new(Snapshot::Cpu(CpuSnapshot::default())))
    }
}

fn drain(rx: &mut mpsc::Receiver<SubsystemUpdate>) -> Vec<SubsystemUpdate> {
    let mut updates = Vec::new();
    while let Ok(update) = rx.try_recv() {
        updates.push(update);
    }
    updates
}

fn count_by_domain(updates: &[SubsystemUpdate]) -> HashMap<Domain, usize> {
    let mut counts = HashMap::new();
    for update in updates {
        *counts.entry(update.domain).or_insert(0) += 1;
    }
    counts
}

#[tokio::test(start_paused = true)]
async fn test_cadences_tick_independently() {
    let (update_tx, mut update_rx) = mpsc::channel(64);
    let (shutdown_tx, _) = broadcast::channel(1);

    let mut scheduler = Scheduler::new();
    scheduler
        .register(Box::new(Steady(Domain::Cpu)), Duration::from_millis(200))
        .register(Box::new(Steady(Domain::Disk)), Duration::from_secs(1));
    assert_eq!(scheduler.len(), 2);
    let handles = scheduler.start(update_tx, &shutdown_tx);

    tokio::time::sleep(Duration::from_millis(1100)).await;
    shutdown_tx.send(()).unwrap();
    for handle in handles {
        handle.await.unwrap();
    }

    let counts = count_by_domain(&drain(&mut update_rx));
    // Fires at 0, 200, ..., 1000 and at 0, 1000
    assert_eq!(counts[&Domain::Cpu], 6);
    assert_eq!(counts[&Domain::Disk], 2);
}

#[tokio::test(start_paused = true)]
async fn test_failing_collector_does_not_stop_others() {
    let (update_tx, mut update_rx) = mpsc::channel(64);
    let (shutdown_tx, _) = broadcast::channel(1);

    let mut scheduler = Scheduler::new();
    scheduler
        .register(Box::new(Steady(Domain::Cpu)), Duration::from_millis(200))
        .register(Box::new(AlwaysFailing), Duration::from_millis(500));
    let handles = scheduler.start(update_tx, &shutdown_tx);

    tokio::time::sleep(Duration::from_millis(1100)).await;
    shutdown_tx.send(()).unwrap();
    for handle in handles {
        handle.await.unwrap();
    }

    let updates = drain(&mut update_rx);
    let counts = count_by_domain(&updates);
    assert_eq!(counts[&Domain::Cpu], 6);
    assert_eq!(counts[&Domain::Network], 3);

    assert!(updates
        .iter()
        .filter(|u| u.domain == Domain::Network)
        .all(|u| matches!(
            u.outcome,
            SampleOutcome::Failed {
                kind: ErrorKind::TransientReadFailure,
                ..
            }
        )));
}

#[tokio::test(start_paused = true)]
async fn test_panicking_collector_is_isolated() {
    let (update_tx, mut update_rx) = mpsc::channel(64);
    let (shutdown_tx, _) = broadcast::channel(1);

    let mut scheduler = Scheduler::new();
    scheduler
        .register(Box::new(Panicking), Duration::from_millis(100))
        .register(Box::new(Steady(Domain::Memory)), Duration::from_millis(200));
    let mut handles = scheduler.start(update_tx, &shutdown_tx);

    tokio::time::sleep(Duration::from_millis(500)).await;
    shutdown_tx.send(()).unwrap();

    let memory_task = handles.pop().unwrap();
    let gpu_task = handles.pop().unwrap();
    assert!(gpu_task.await.unwrap_err().is_panic());
    memory_task.await.unwrap();

    let counts = count_by_domain(&drain(&mut update_rx));
    assert_eq!(counts.get(&Domain::Gpu), None);
    assert_eq!(counts[&Domain::Memory], 3);
}

#[tokio::test(start_paused = true)]
async fn test_overrun_cycle_skips_missed_ticks() {
    // One slot: the second cycle stays blocked until the UI side drains
    let (update_tx, mut update_rx) = mpsc::channel(1);
    let (shutdown_tx, _) = broadcast::channel(1);
    let start = Instant::now();
    let stamps = Arc::new(Mutex::new(Vec::new()));

    let mut scheduler = Scheduler::new();
    scheduler.register(
        Box::new(Stamping {
            start,
            stamps: Arc::clone(&stamps),
        }),
        Duration::from_millis(100),
    );
    let handles = scheduler.start(update_tx, &shutdown_tx);

    // The cycle started at 100 ms runs until 350 ms, past the 200 and 300 ms fires
    tokio::time::sleep(Duration::from_millis(350)).await;

    let deadline = start + Duration::from_millis(390);
    let mut received = 0;
    while let Ok(Some(_)) = tokio::time::timeout_at(deadline, update_rx.recv()).await {
        received += 1;
    }

    // Exactly one catch-up sample at 350 ms, the next one waits for 400 ms
    assert_eq!(received, 3);
    let sampled_at: Vec<u128> = stamps.lock().unwrap().iter().map(Duration::as_millis).collect();
    assert_eq!(sampled_at, vec![0, 100, 350]);

    shutdown_tx.send(()).unwrap();
    for handle in handles {
        handle.await.unwrap();
    }
}
