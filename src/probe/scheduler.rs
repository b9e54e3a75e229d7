//! Bounded worker pool for probe execution
//!
//! A fixed number of workers pull URLs from a shared queue and push each
//! outcome onto a channel. A worker starts its next URL the moment its
//! previous probe completes, so the pool refills greedily while the number
//! of in-flight probes never exceeds the worker count. One slow probe only
//! occupies its own worker; the others keep draining the queue.

use crate::probe::prober::{probe_url, ProbeOutcome};
use reqwest::Client;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Probes every URL with at most `parallelism` requests in flight
///
/// Returns a receiver yielding exactly one [`ProbeOutcome`] per input URL in
/// completion order. The channel closes once the queue is drained and all
/// workers have finished. Individual probe failures become degraded
/// outcomes; the scheduler itself never fails.
pub fn run_probes(
    client: Client,
    urls: Vec<String>,
    parallelism: usize,
    timeout: Duration,
) -> mpsc::Receiver<ProbeOutcome> {
    let parallelism = parallelism.max(1);
    let (tx, rx) = mpsc::channel(parallelism);
    let queue = Arc::new(Mutex::new(VecDeque::from(urls)));

    for _ in 0..parallelism {
        let client = client.clone();
        let queue = Arc::clone(&queue);
        let tx = tx.clone();

        tokio::spawn(async move {
            loop {
                // Lock only for the pop; probing happens outside
                let next = queue.lock().unwrap().pop_front();
                let Some(url) = next else {
                    break;
                };

                let outcome = probe_url(&client, &url, timeout).await;
                if tx.send(outcome).await.is_err() {
                    // Receiver dropped, stop probing
                    break;
                }
            }
        });
    }

    rx
}
