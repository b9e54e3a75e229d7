//! Structure-preserving updates of the persisted job record

use crate::stats::Stats;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Handle to the externally owned job record for one run
#[derive(Debug, Clone)]
pub struct JobRecord {
    path: PathBuf,
}

impl JobRecord {
    /// Builds the record handle for a job id: `<state_dir>/<job_id>.job`
    pub fn for_job(state_dir: &Path, job_id: &str) -> Self {
        Self {
            path: state_dir.join(format!("{job_id}.job")),
        }
    }

    /// Path of the underlying record file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mirrors the given counters into the record
    ///
    /// Only the six stat fields are replaced; every other field in the
    /// record is preserved. An absent or unparsable record makes this a
    /// silent no-op.
    pub fn update(&self, stats: &Stats) {
        if let Err(e) = self.try_update(stats) {
            tracing::debug!("job record update skipped for {}: {}", self.path.display(), e);
        }
    }

    fn try_update(&self, stats: &Stats) -> crate::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(&self.path)?;
        let mut record: Value = serde_json::from_str(&content)?;
        let Some(fields) = record.as_object_mut() else {
            return Ok(());
        };

        if let Value::Object(counters) = serde_json::to_value(stats)? {
            for (name, value) in counters {
                fields.insert(name, value);
            }
        }

        fs::write(&self.path, serde_json::to_string_pretty(&record)?)?;
        Ok(())
    }
}
