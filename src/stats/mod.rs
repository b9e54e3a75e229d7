//! Running counters for a prewarm run
//!
//! `Stats` has exactly one writer: the orchestrator's drain loop calls
//! [`Stats::record`] once per probe outcome. Everything else (the progress
//! reporter, the final summary) only ever reads snapshots, so no locking is
//! needed on the counters.

use crate::probe::{CacheStatus, ProbeOutcome};
use serde::Serialize;

/// Aggregate hit/miss/expired/failure counters
///
/// `progress` is monotonically non-decreasing and ends equal to `total`;
/// `hit + miss + expired + failed <= progress` — the gap covers successful
/// probes whose response carried no HIT/MISS/EXPIRED signal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Number of discovered URLs; fixed once discovery completes
    pub total: u64,

    /// Number of probes completed so far
    pub progress: u64,

    /// Probes served from cache
    pub hit: u64,

    /// Probes that populated the cache from origin
    pub miss: u64,

    /// Probes that revalidated a stale entry
    pub expired: u64,

    /// Probes that failed (transport error or non-2xx status)
    pub failed: u64,
}

impl Stats {
    /// Folds one probe outcome into the counters
    ///
    /// 200/206 responses are classified by cache status; any other status
    /// (including 0 for transport failures) counts as failed.
    pub fn record(&mut self, outcome: &ProbeOutcome) {
        self.progress += 1;

        match outcome.status_code {
            200 | 206 => match outcome.cache {
                CacheStatus::Hit => self.hit += 1,
                CacheStatus::Miss => self.miss += 1,
                CacheStatus::Expired => self.expired += 1,
                CacheStatus::None | CacheStatus::Error => {}
            },
            _ => self.failed += 1,
        }
    }

    /// Hit rate as a percentage of the total, or `None` when nothing was
    /// discovered
    pub fn hit_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.hit as f64 / self.total as f64 * 100.0)
    }
}
