//! Cache-status probing
//!
//! This module contains everything that touches the network during the
//! warming phase:
//! - HTTP client construction with proper timeouts and a browser user agent
//! - Single-URL HEAD probes that classify the edge cache's response
//! - A bounded worker pool that probes every discovered URL without ever
//!   exceeding the configured parallelism

mod client;
mod prober;
mod scheduler;

pub use client::build_http_client;
pub use prober::{probe_url, CacheStatus, ProbeOutcome};
pub use scheduler::run_probes;
