//! Scheduled batch runner configuration.

use serde::{Deserialize, Serialize};

/// Settings for the periodic drain of the scheduled notification queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the scheduler is started with the server.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression (seconds first) for batch runs.
    #[serde(default = "default_schedule")]
    pub schedule: String,
    /// Maximum number of due records claimed per run.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Number of records processed concurrently within a run.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Ceiling for a single run, in seconds. Past it no new records start.
    #[serde(default = "default_run_timeout")]
    pub run_timeout_seconds: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            schedule: default_schedule(),
            batch_size: default_batch_size(),
            concurrency: default_concurrency(),
            run_timeout_seconds: default_run_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_schedule() -> String {
    "0 */5 * * * *".to_string()
}

fn default_batch_size() -> usize {
    50
}

fn default_concurrency() -> usize {
    10
}

fn default_run_timeout() -> u64 {
    240
}
