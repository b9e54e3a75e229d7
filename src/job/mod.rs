//! Job-record persistence and periodic progress reporting
//!
//! The job record is an externally owned JSON file; this module only ever
//! performs partial field updates on it and never creates one. A missing or
//! malformed record makes every update a silent no-op.

mod record;
mod reporter;

pub use record::JobRecord;
pub use reporter::ProgressReporter;
