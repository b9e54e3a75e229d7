//! Periodic progress reporter
//!
//! Runs as an independent task concurrent with the probe pool. It only ever
//! reads the latest stats snapshot from a watch channel and writes it into
//! the job record, so it needs no coordination with the probe-completion
//! path.

use crate::job::record::JobRecord;
use crate::stats::Stats;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Background task mirroring stats snapshots into the job record
pub struct ProgressReporter {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl ProgressReporter {
    /// Spawns the reporter, writing the current snapshot every `period`
    pub fn spawn(record: JobRecord, stats_rx: watch::Receiver<Stats>, period: Duration) -> Self {
        let (shutdown, mut shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the orchestrator already
            // wrote the initial snapshot, so skip it.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => record.update(&stats_rx.borrow()),
                    _ = &mut shutdown_rx => break,
                }
            }

            // Final write, exactly once per run
            record.update(&stats_rx.borrow());
        });

        Self { shutdown, handle }
    }

    /// Signals shutdown and waits for the final write to land
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        let _ = self.handle.await;
    }
}
