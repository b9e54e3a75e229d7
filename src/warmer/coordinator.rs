//! Run coordinator
//!
//! The orchestration for a single prewarm run:
//! 1. Walk the manifest tree (fatal on failure, nothing is probed)
//! 2. Fix `total`, write the first job-record snapshot, start the reporter
//! 3. Drain the probe pool into the stats counters, one log line per probe
//! 4. Stop the reporter (final record write) and print the summary

use crate::job::{JobRecord, ProgressReporter};
use crate::manifest::{self, basename, variant_label};
use crate::probe::{build_http_client, run_probes, ProbeOutcome};
use crate::stats::Stats;
use crate::Result;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::watch;

/// Default number of concurrently in-flight probes
pub const DEFAULT_PARALLELISM: usize = 10;

/// Default directory holding externally created job records
pub const DEFAULT_STATE_DIR: &str = "/var/lib/prewarm/running";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default interval between job-record progress writes
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(3);

/// Options controlling a single prewarm run
#[derive(Debug, Clone)]
pub struct WarmOptions {
    /// Job identifier; the record lives at `<state_dir>/<job_id>.job`
    pub job_id: String,

    /// Master manifest URL to walk and prewarm
    pub master_url: String,

    /// Maximum number of concurrently in-flight probes
    pub parallelism: usize,

    /// Directory holding job records
    pub state_dir: PathBuf,

    /// Per-request timeout for manifest fetches and probes
    pub timeout: Duration,

    /// Interval between job-record progress writes
    pub report_interval: Duration,
}

impl WarmOptions {
    /// Creates options with the default parallelism, paths, and timings
    pub fn new(job_id: impl Into<String>, master_url: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            master_url: master_url.into(),
            parallelism: DEFAULT_PARALLELISM,
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            timeout: DEFAULT_TIMEOUT,
            report_interval: DEFAULT_REPORT_INTERVAL,
        }
    }
}

/// Runs one complete prewarm: discovery, probing, reporting, summary
///
/// Returns the final counters. Fails only when the master manifest cannot
/// be retrieved; every per-probe failure is folded into the `failed` count.
pub async fn run(opts: WarmOptions) -> Result<Stats> {
    log_line(&format!(
        "Starting prewarm: {} (parallel: {})",
        opts.master_url, opts.parallelism
    ));

    let record = JobRecord::for_job(&opts.state_dir, &opts.job_id);
    let client = build_http_client(opts.timeout)?;

    let discovery = match manifest::discover(&client, &opts.master_url).await {
        Ok(discovery) => discovery,
        Err(e) => {
            log_line(&format!("ERROR: Failed to fetch master playlist: {}", e));
            // The reporter never started; this is the run's one final write
            record.update(&Stats::default());
            return Err(e);
        }
    };

    let mut stats = Stats {
        total: discovery.urls.len() as u64,
        ..Stats::default()
    };

    log_line(&format!("Found {} unique URLs", discovery.urls.len()));
    let variants = if discovery.variants.is_empty() {
        "none".to_string()
    } else {
        discovery.variants.join(", ")
    };
    log_line(&format!("Variants: {}", variants));

    record.update(&stats);
    let (stats_tx, stats_rx) = watch::channel(stats);
    let reporter = ProgressReporter::spawn(record.clone(), stats_rx, opts.report_interval);

    log_line(&format!(
        "Pre-warming with {} parallel connections...",
        opts.parallelism
    ));

    let mut outcomes = run_probes(client.clone(), discovery.urls, opts.parallelism, opts.timeout);
    while let Some(outcome) = outcomes.recv().await {
        stats.record(&outcome);
        let _ = stats_tx.send(stats);
        print_outcome(&outcome);
    }

    // Stopping the reporter performs the guaranteed final record write
    reporter.stop().await;

    log_line("");
    log_line("==========================================");
    log_line(&format!(
        "Summary: {} total | HIT {} | MISS {} | EXPIRED {} | FAILED {}",
        stats.total, stats.hit, stats.miss, stats.expired, stats.failed
    ));
    if let Some(rate) = stats.hit_rate() {
        log_line(&format!("Hit Rate: {:.1}%", rate));
    }
    log_line("==========================================");
    log_line("Completed!");

    // Release pooled connections before exit
    drop(client);

    Ok(stats)
}

/// Prints a timestamped operator log line
fn log_line(msg: &str) {
    println!("[{}] {}", chrono::Local::now().format("%H:%M:%S"), msg);
}

/// Prints the per-probe result line
fn print_outcome(outcome: &ProbeOutcome) {
    let marker = if matches!(outcome.status_code, 200 | 206) {
        '✓'
    } else {
        '✗'
    };
    let code = if outcome.status_code == 0 {
        "ERR".to_string()
    } else {
        outcome.status_code.to_string()
    };

    log_line(&format!(
        "{} {} | {} | {} | {}ms | {} | {}",
        marker,
        code,
        outcome.cache,
        outcome.edge_location,
        outcome.elapsed_ms,
        variant_label(&outcome.url),
        basename(&outcome.url)
    ));
}
