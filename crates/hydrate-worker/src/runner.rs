//! Batch runner: drains due records from the notification queue.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::Serialize;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use tokio::time::Instant;

use hydrate_core::config::WorkerConfig;
use hydrate_core::error::AppError;
use hydrate_core::result::AppResult;
use hydrate_database::store::NotificationQueue;
use hydrate_entity::notification::ScheduledNotification;

use crate::executor::NotificationHandler;

/// Counters for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Due records returned by the queue.
    pub fetched: usize,
    /// Records marked processed.
    pub processed: usize,
    /// Records marked failed.
    pub failed: usize,
    /// Records another runner finished first.
    pub conflicts: usize,
    /// Records whose terminal mark could not be written. They stay pending.
    pub unrecorded: usize,
    /// Records not started because the run deadline passed.
    pub deferred: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordOutcome {
    Processed,
    Failed,
    Conflict,
    Unrecorded,
}

impl BatchReport {
    fn tally(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Processed => self.processed += 1,
            RecordOutcome::Failed => self.failed += 1,
            RecordOutcome::Conflict => self.conflicts += 1,
            RecordOutcome::Unrecorded => self.unrecorded += 1,
        }
    }
}

/// Claims due records and hands each to the handler in its own task.
///
/// A failure or panic in one record never affects the others. Only one run
/// executes at a time per runner.
#[derive(Debug)]
pub struct BatchRunner {
    /// Queue the records come from
    queue: Arc<dyn NotificationQueue>,
    /// Handler for each record
    handler: Arc<dyn NotificationHandler>,
    /// Worker configuration
    config: WorkerConfig,
    /// Held for the duration of a run
    running: Mutex<()>,
}

impl BatchRunner {
    /// Create a new batch runner
    pub fn new(
        queue: Arc<dyn NotificationQueue>,
        handler: Arc<dyn NotificationHandler>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            queue,
            handler,
            config,
            running: Mutex::new(()),
        }
    }

    /// Worker configuration in use.
    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Process every record due at `now`, up to the configured batch size.
    ///
    /// Fails with `Conflict` when another run is still in progress, or when
    /// the queue cannot be read.
    pub async fn run_once(&self, now: DateTime<Utc>) -> AppResult<BatchReport> {
        let _guard = self
            .running
            .try_lock()
            .map_err(|_| AppError::conflict("A batch run is already in progress"))?;

        let deadline = Instant::now() + Duration::from_secs(self.config.run_timeout_seconds);
        let records = self.queue.fetch_due(now, self.config.batch_size).await?;

        let mut report = BatchReport {
            fetched: records.len(),
            ..BatchReport::default()
        };
        if records.is_empty() {
            tracing::debug!("No scheduled notifications due");
            return Ok(report);
        }

        tracing::info!(
            "Batch run started: {} due, handler='{}', concurrency={}",
            records.len(),
            self.handler.name(),
            self.config.concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut tasks = JoinSet::new();
        let mut pending = records.into_iter();

        while let Some(record) = pending.next() {
            let permit = tokio::select! {
                permit = semaphore.clone().acquire_owned() => permit.ok(),
                _ = tokio::time::sleep_until(deadline) => None,
            };
            let Some(permit) = permit.filter(|_| Instant::now() < deadline) else {
                report.deferred = 1 + pending.len();
                tracing::warn!(
                    "Batch deadline reached, {} records left for the next run",
                    report.deferred
                );
                break;
            };

            let queue = Arc::clone(&self.queue);
            let handler = Arc::clone(&self.handler);
            tasks.spawn(async move {
                let _permit = permit;
                process_record(queue.as_ref(), handler.as_ref(), record, now).await
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => report.tally(outcome),
                Err(e) => {
                    tracing::error!("Batch task aborted: {}", e);
                    report.unrecorded += 1;
                }
            }
        }

        tracing::info!(
            "Batch run finished: processed={}, failed={}, conflicts={}, unrecorded={}, deferred={}",
            report.processed,
            report.failed,
            report.conflicts,
            report.unrecorded,
            report.deferred
        );
        Ok(report)
    }
}

async fn process_record(
    queue: &dyn NotificationQueue,
    handler: &dyn NotificationHandler,
    record: ScheduledNotification,
    now: DateTime<Utc>,
) -> RecordOutcome {
    let id = record.id;
    let result = AssertUnwindSafe(handler.handle(&record, now))
        .catch_unwind()
        .await;

    let failure = match result {
        Ok(Ok(detail)) => {
            if let Some(detail) = detail {
                tracing::debug!(
                    "Scheduled notification {} handled by {}: {}",
                    id,
                    handler.name(),
                    detail
                );
            }
            None
        }
        Ok(Err(e)) => Some(e.to_string()),
        Err(panic) => Some(format!("Handler panicked: {}", panic_message(panic.as_ref()))),
    };

    let (marked, outcome) = match &failure {
        None => (queue.mark_processed(id, now).await, RecordOutcome::Processed),
        Some(msg) => {
            tracing::warn!("Scheduled notification {} failed: {}", id, msg);
            (queue.mark_failed(id, now, msg).await, RecordOutcome::Failed)
        }
    };

    match marked {
        Ok(true) => outcome,
        Ok(false) => {
            tracing::warn!(
                "Scheduled notification {} was already finished by another run",
                id
            );
            RecordOutcome::Conflict
        }
        Err(e) => {
            tracing::error!("Failed to record outcome for notification {}: {}", id, e);
            RecordOutcome::Unrecorded
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use hydrate_database::memory::MemoryNotificationQueue;
    use hydrate_entity::notification::{NotificationCategory, Tone};
    use serde_json::Value;
    use uuid::Uuid;

    use crate::executor::DeliveryJobError;

    #[derive(Debug, Clone, Copy)]
    enum Behavior {
        Succeed,
        Report,
        Fail,
        Panic,
        FinishElsewhere,
    }

    #[derive(Debug)]
    struct ScriptedHandler {
        queue: Arc<MemoryNotificationQueue>,
        script: HashMap<Uuid, Behavior>,
    }

    #[async_trait]
    impl NotificationHandler for ScriptedHandler {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn handle(
            &self,
            record: &ScheduledNotification,
            now: DateTime<Utc>,
        ) -> Result<Option<Value>, DeliveryJobError> {
            match self.script.get(&record.id).copied().unwrap_or(Behavior::Succeed) {
                Behavior::Succeed => Ok(None),
                Behavior::Report => Ok(Some(serde_json::json!({ "channel": "fcm" }))),
                Behavior::Fail => Err(DeliveryJobError::Undeliverable("push rejected".into())),
                Behavior::Panic => panic!("template missing"),
                Behavior::FinishElsewhere => {
                    self.queue.mark_processed(record.id, now).await.unwrap();
                    Ok(None)
                }
            }
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap()
    }

    fn record(minutes_ago: i64) -> ScheduledNotification {
        ScheduledNotification::new(
            Uuid::new_v4(),
            NotificationCategory::Drink,
            now() - ChronoDuration::minutes(minutes_ago),
            500,
            2000,
            Tone::Friendly,
        )
    }

    async fn setup(
        behaviors: &[Behavior],
        config: WorkerConfig,
    ) -> (Arc<MemoryNotificationQueue>, BatchRunner, Vec<Uuid>) {
        let queue = Arc::new(MemoryNotificationQueue::new());
        let mut script = HashMap::new();
        let mut ids = Vec::new();
        for (i, behavior) in behaviors.iter().enumerate() {
            let rec = record(30 - i as i64);
            queue.enqueue(&rec).await.unwrap();
            script.insert(rec.id, *behavior);
            ids.push(rec.id);
        }
        let handler = Arc::new(ScriptedHandler {
            queue: queue.clone(),
            script,
        });
        let runner = BatchRunner::new(queue.clone(), handler, config);
        (queue, runner, ids)
    }

    #[tokio::test]
    async fn test_panic_and_error_are_isolated() {
        let (queue, runner, ids) = setup(
            &[Behavior::Succeed, Behavior::Panic, Behavior::Succeed, Behavior::Fail],
            WorkerConfig::default(),
        )
        .await;

        let report = runner.run_once(now()).await.unwrap();
        assert_eq!(report.fetched, 4);
        assert_eq!(report.processed, 2);
        assert_eq!(report.failed, 2);

        let first = queue.get(ids[0]).await.unwrap().unwrap();
        let panicked = queue.get(ids[1]).await.unwrap().unwrap();
        let third = queue.get(ids[2]).await.unwrap().unwrap();
        let rejected = queue.get(ids[3]).await.unwrap().unwrap();
        assert!(first.processed && !first.failed);
        assert!(third.processed && !third.failed);
        assert!(panicked.failed && !panicked.processed);
        assert!(panicked.error.unwrap().contains("template missing"));
        assert_eq!(rejected.error.as_deref(), Some("Delivery failed: push rejected"));
    }

    #[tokio::test]
    async fn test_handler_detail_still_marks_processed() {
        let (queue, runner, ids) =
            setup(&[Behavior::Report, Behavior::Succeed], WorkerConfig::default()).await;

        let report = runner.run_once(now()).await.unwrap();
        assert_eq!(report.processed, 2);
        let reported = queue.get(ids[0]).await.unwrap().unwrap();
        assert!(reported.processed && reported.error.is_none());
    }

    #[tokio::test]
    async fn test_records_are_not_picked_up_twice() {
        let (_queue, runner, _ids) =
            setup(&[Behavior::Succeed, Behavior::Fail], WorkerConfig::default()).await;

        runner.run_once(now()).await.unwrap();
        let second = runner.run_once(now()).await.unwrap();
        assert_eq!(second, BatchReport::default());
    }

    #[tokio::test]
    async fn test_finished_elsewhere_counts_as_conflict() {
        let (queue, runner, ids) =
            setup(&[Behavior::FinishElsewhere], WorkerConfig::default()).await;

        let report = runner.run_once(now()).await.unwrap();
        assert_eq!(report.conflicts, 1);
        assert_eq!(report.processed, 0);
        assert!(queue.get(ids[0]).await.unwrap().unwrap().processed);
    }

    #[tokio::test]
    async fn test_batch_size_limits_claims() {
        let config = WorkerConfig {
            batch_size: 2,
            concurrency: 1,
            ..WorkerConfig::default()
        };
        let (queue, runner, ids) = setup(
            &[Behavior::Succeed, Behavior::Succeed, Behavior::Succeed],
            config,
        )
        .await;

        let report = runner.run_once(now()).await.unwrap();
        assert_eq!(report.processed, 2);
        assert!(!queue.get(ids[2]).await.unwrap().unwrap().processed);
    }

    #[tokio::test]
    async fn test_future_records_untouched() {
        let queue = Arc::new(MemoryNotificationQueue::new());
        let mut later = record(0);
        later.scheduled_for = now() + ChronoDuration::minutes(10);
        queue.enqueue(&later).await.unwrap();
        let handler = Arc::new(ScriptedHandler {
            queue: queue.clone(),
            script: HashMap::new(),
        });
        let runner = BatchRunner::new(queue.clone(), handler, WorkerConfig::default());

        let report = runner.run_once(now()).await.unwrap();
        assert_eq!(report.fetched, 0);
        assert!(!queue.get(later.id).await.unwrap().unwrap().is_terminal());
    }

    #[tokio::test]
    async fn test_expired_deadline_defers_everything() {
        let config = WorkerConfig {
            run_timeout_seconds: 0,
            ..WorkerConfig::default()
        };
        let (queue, runner, ids) = setup(&[Behavior::Succeed, Behavior::Succeed], config).await;

        let report = runner.run_once(now()).await.unwrap();
        assert_eq!(report.deferred, 2);
        assert_eq!(report.processed, 0);
        assert!(!queue.get(ids[0]).await.unwrap().unwrap().is_terminal());
    }

    #[tokio::test]
    async fn test_overlapping_run_rejected() {
        let (_queue, runner, _ids) = setup(&[Behavior::Succeed], WorkerConfig::default()).await;

        let _held = runner.running.lock().await;
        let err = runner.run_once(now()).await.unwrap_err();
        assert_eq!(err.kind, hydrate_core::error::ErrorKind::Conflict);
    }
}
