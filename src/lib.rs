//! Edgewarm: an HLS edge-cache prewarming worker
//!
//! This crate walks a master manifest, discovers every variant manifest and
//! media segment it references, and probes each resource with a bounded pool
//! of HEAD requests so that subsequent client requests hit a populated cache.

pub mod job;
pub mod manifest;
pub mod probe;
pub mod stats;
pub mod warmer;

use thiserror::Error;

/// Main error type for edgewarm operations
#[derive(Debug, Error)]
pub enum WarmError {
    #[error("failed to fetch master manifest {url}: {source}")]
    MasterFetch { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for edgewarm operations
pub type Result<T> = std::result::Result<T, WarmError>;

// Re-export commonly used types
pub use manifest::{discover, Discovery};
pub use probe::{build_http_client, probe_url, run_probes, CacheStatus, ProbeOutcome};
pub use stats::Stats;
pub use warmer::{run, WarmOptions};
