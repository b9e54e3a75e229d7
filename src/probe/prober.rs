//! Single-URL cache probe
//!
//! A probe is a HEAD request that never fails: every HTTP status code is a
//! valid response, and transport errors (including timeouts) degrade into an
//! outcome with `status_code = 0` rather than propagating.

use reqwest::Client;
use std::fmt;
use std::time::{Duration, Instant};

/// Response header carrying the edge cache's verdict for the resource
const CACHE_STATUS_HEADER: &str = "cf-cache-status";

/// Response header identifying the edge node, formatted `<id>-<LOCATION>[-<suffix>]`
const EDGE_LOCATION_HEADER: &str = "cf-ray";

/// Edge location reported when the header is absent or malformed
const UNKNOWN_EDGE: &str = "UNK";

/// Edge-cache verdict for a probed resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Served from cache
    Hit,
    /// Fetched from origin, now cached
    Miss,
    /// Stale entry revalidated against origin
    Expired,
    /// No caching signal in the response
    None,
    /// Transport failure, no response at all
    Error,
}

impl CacheStatus {
    /// Parses a cache-status header value; anything unrecognized counts as
    /// no caching signal
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "HIT" => Self::Hit,
            "MISS" => Self::Miss,
            "EXPIRED" => Self::Expired,
            _ => Self::None,
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
            Self::Expired => "EXPIRED",
            Self::None => "NONE",
            Self::Error => "ERR",
        };
        f.write_str(label)
    }
}

/// Outcome of probing a single resource. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// The probed URL
    pub url: String,

    /// HTTP status code; 0 means the request never got a response
    pub status_code: u16,

    /// Edge-cache verdict
    pub cache: CacheStatus,

    /// Edge location that handled the probe, `UNK` when unknown
    pub edge_location: String,

    /// Measured wall time in milliseconds
    pub elapsed_ms: u64,
}

/// Probes a single URL with a HEAD request
///
/// Accepts every HTTP status as a valid response; a server that rejects HEAD
/// with 4xx/5xx still yields a regular outcome. Transport errors and
/// timeouts yield a degraded outcome instead of an error.
pub async fn probe_url(client: &Client, url: &str, timeout: Duration) -> ProbeOutcome {
    let start = Instant::now();

    match client.head(url).timeout(timeout).send().await {
        Ok(response) => {
            let cache = response
                .headers()
                .get(CACHE_STATUS_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(CacheStatus::parse)
                .unwrap_or(CacheStatus::None);

            let edge_location = response
                .headers()
                .get(EDGE_LOCATION_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_edge_location)
                .unwrap_or(UNKNOWN_EDGE)
                .to_string();

            ProbeOutcome {
                url: url.to_string(),
                status_code: response.status().as_u16(),
                cache,
                edge_location,
                elapsed_ms: start.elapsed().as_millis() as u64,
            }
        }
        Err(e) => {
            tracing::debug!("probe failed for {}: {}", url, e);
            ProbeOutcome {
                url: url.to_string(),
                status_code: 0,
                cache: CacheStatus::Error,
                edge_location: UNKNOWN_EDGE.to_string(),
                elapsed_ms: start.elapsed().as_millis() as u64,
            }
        }
    }
}

/// Extracts the location token from an edge identifier header value
fn parse_edge_location(value: &str) -> Option<&str> {
    let mut parts = value.split('-');
    parts.next()?;
    parts.next().filter(|token| !token.is_empty())
}
