//! Edgewarm main entry point
//!
//! This is the command-line interface for the edgewarm cache-prewarming
//! worker.

use clap::Parser;
use edgewarm::warmer::{self, WarmOptions, DEFAULT_STATE_DIR};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Edgewarm: an HLS edge-cache prewarming worker
///
/// Edgewarm walks a master manifest, discovers every variant manifest and
/// media segment it references, and probes each resource so that subsequent
/// client requests hit a populated edge cache. Progress is mirrored into the
/// job record created by the submitting service.
#[derive(Parser, Debug)]
#[command(name = "edgewarm")]
#[command(version = "1.0.0")]
#[command(about = "An HLS edge-cache prewarming worker", long_about = None)]
struct Cli {
    /// Job identifier; progress is mirrored into <STATE_DIR>/<JOB_ID>.job
    #[arg(value_name = "JOB_ID")]
    job_id: String,

    /// Master manifest URL to prewarm
    #[arg(value_name = "MASTER_URL")]
    master_url: String,

    /// Maximum number of concurrent probe requests
    #[arg(value_name = "PARALLELISM", default_value_t = 10)]
    parallelism: usize,

    /// Directory holding externally created job records
    #[arg(long, value_name = "DIR", default_value = DEFAULT_STATE_DIR)]
    state_dir: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 10)]
    timeout: u64,

    /// Seconds between job-record progress writes
    #[arg(long, value_name = "SECONDS", default_value_t = 3)]
    report_interval: u64,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error diagnostics
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let opts = WarmOptions {
        job_id: cli.job_id,
        master_url: cli.master_url,
        parallelism: cli.parallelism,
        state_dir: cli.state_dir,
        timeout: Duration::from_secs(cli.timeout),
        report_interval: Duration::from_secs(cli.report_interval),
    };

    // A failed discovery is the only fatal path; it exits with code 1
    warmer::run(opts).await?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("edgewarm=info,warn"),
            1 => EnvFilter::new("edgewarm=debug,info"),
            2 => EnvFilter::new("edgewarm=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
