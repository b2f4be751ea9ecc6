//! Rate computation for cumulative network counters.

use super::metrics::{Delta, InterfaceRate, NetworkSnapshot};

/// Compute per-interface throughput between two snapshots.
///
/// Interfaces are matched by name. Ones missing from `new` are dropped, ones
/// missing from `old` get no rate yet. A counter that went backwards (driver
/// reload, wrap) reports 0 instead of a negative rate.
pub fn network_delta(old: &NetworkSnapshot, new: &NetworkSnapshot) -> Delta {
    let elapsed_secs = new
        .taken_at
        .saturating_duration_since(old.taken_at)
        .as_secs_f64();

    let rates = new
        .interfaces
        .iter()
        .filter_map(|current| {
            let previous = old.interface(&current.name)?;
            Some(InterfaceRate {
                interface: current.name.clone(),
                sent_per_sec: per_second(previous.bytes_sent, current.bytes_sent, elapsed_secs),
                recv_per_sec: per_second(previous.bytes_recv, current.bytes_recv, elapsed_secs),
            })
        })
        .collect();

    Delta {
        elapsed_secs,
        rates,
    }
}

fn per_second(old: u64, new: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }
    new.saturating_sub(old) as f64 / elapsed_secs
}
