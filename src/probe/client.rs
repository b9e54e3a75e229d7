//! HTTP client construction

use reqwest::Client;
use std::time::Duration;

/// User agent sent with every request. Edges serve some resources
/// differently to non-browser clients, so probes identify as one.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Builds the pooled HTTP client used for both manifest fetches and probes
///
/// # Arguments
///
/// * `timeout` - Total per-request timeout
///
/// # Example
///
/// ```no_run
/// use edgewarm::probe::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}
