//! Cron trigger for the batch runner.

use std::sync::Arc;

use chrono::Utc;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use hydrate_core::error::{AppError, ErrorKind};

use crate::runner::BatchRunner;

/// Cron-based scheduler that runs the batch runner on its schedule.
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Runner triggered on every tick
    runner: Arc<BatchRunner>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(runner: Arc<BatchRunner>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler, runner })
    }

    /// Register the batch drain using the runner's configured schedule.
    ///
    /// A tick that fires while the previous run is still going is skipped.
    pub async fn register_batch_drain(&self) -> Result<(), AppError> {
        let schedule = self.runner.config().schedule.clone();
        let runner = Arc::clone(&self.runner);

        let job = CronJob::new_async(schedule.as_str(), move |_uuid, _lock| {
            let runner = Arc::clone(&runner);
            Box::pin(async move {
                match runner.run_once(Utc::now()).await {
                    Ok(report) if report.fetched > 0 => {
                        tracing::info!(
                            processed = report.processed,
                            failed = report.failed,
                            conflicts = report.conflicts,
                            deferred = report.deferred,
                            "Scheduled batch complete"
                        );
                    }
                    Ok(_) => {}
                    Err(e) if e.kind == ErrorKind::Conflict => {
                        tracing::warn!("Previous batch still running, skipping this tick");
                    }
                    Err(e) => {
                        tracing::error!("Scheduled batch failed: {}", e);
                    }
                }
            })
        })
        .map_err(|e| {
            AppError::configuration(format!("Invalid worker schedule '{}': {}", schedule, e))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add batch schedule: {}", e)))?;

        tracing::info!("Registered: batch_drain ({})", schedule);
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}
