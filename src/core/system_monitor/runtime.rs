//! Scheduler for metrics collection.
//!
//! Every registered collector runs in its own task with its own timer. Tasks
//! share nothing; each one owns its `CollectorState` and reports outcomes to
//! the UI loop over an mpsc channel.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::collector::{Collector, CollectorState, SampleOutcome};
use super::metrics::Domain;

/// Update sent from a collector task to the UI loop
#[derive(Debug, Clone)]
pub struct SubsystemUpdate {
    pub domain: Domain,
    pub outcome: SampleOutcome,
}

/// Collectors paired with their cadence, waiting to be started
#[derive(Default)]
pub struct Scheduler {
    entries: Vec<(Box<dyn Collector>, Duration)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, collector: Box<dyn Collector>, cadence: Duration) -> &mut Self {
        log::debug!(
            "Registered {} collector every {:?}",
            collector.domain().label(),
            cadence
        );
        self.entries.push((collector, cadence));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Spawn one task per collector on the current runtime.
    ///
    /// Must be called from within a tokio runtime. A panic inside one
    /// collector ends only that collector's task.
    pub fn start(
        self,
        update_tx: mpsc::Sender<SubsystemUpdate>,
        shutdown: &broadcast::Sender<()>,
    ) -> Vec<JoinHandle<()>> {
        log::info!("Starting {} collector tasks", self.entries.len());

        self.entries
            .into_iter()
            .map(|(collector, cadence)| {
                tokio::spawn(collector_task(
                    collector,
                    cadence,
                    update_tx.clone(),
                    shutdown.subscribe(),
                ))
            })
            .collect()
    }
}

/// Sample one collector on a repeating timer until shutdown.
///
/// Fires immediately, then every `cadence`. A late fire is skipped rather than
/// queued, and the sample is awaited before the next tick so samples of one
/// domain never overlap.
async fn collector_task(
    mut collector: Box<dyn Collector>,
    cadence: Duration,
    update_tx: mpsc::Sender<SubsystemUpdate>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let domain = collector.domain();
    let mut state = CollectorState::new(cadence);

    let mut ticker = interval(state.cadence());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    log::debug!("{} collector task started", domain.label());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let result = collector.sample(state.previous());
                let outcome = state.record(result);

                if update_tx.send(SubsystemUpdate { domain, outcome }).await.is_err() {
                    // UI loop is gone
                    break;
                }
            }
            _ = shutdown.recv() => {
                break;
            }
        }
    }

    log::debug!("{} collector task stopped", domain.label());
}
