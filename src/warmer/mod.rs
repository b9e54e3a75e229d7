//! Prewarm orchestration
//!
//! Sequences discovery, probing, aggregation, and reporting for one run.

mod coordinator;

pub use coordinator::{
    run, WarmOptions, DEFAULT_PARALLELISM, DEFAULT_REPORT_INTERVAL, DEFAULT_STATE_DIR,
    DEFAULT_TIMEOUT,
};
