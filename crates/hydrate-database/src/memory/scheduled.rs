//! In-memory scheduled notification queue.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use hydrate_core::result::AppResult;
use hydrate_entity::notification::ScheduledNotification;

use crate::store::NotificationQueue;

/// Queue records keyed by id.
#[derive(Debug, Default)]
pub struct MemoryNotificationQueue {
    records: DashMap<Uuid, ScheduledNotification>,
}

impl MemoryNotificationQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records, terminal or not.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the queue holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl NotificationQueue for MemoryNotificationQueue {
    async fn enqueue(&self, record: &ScheduledNotification) -> AppResult<()> {
        self.records.insert(record.id, record.clone());
        Ok(())
    }

    async fn fetch_due(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> AppResult<Vec<ScheduledNotification>> {
        let mut due: Vec<ScheduledNotification> = self
            .records
            .iter()
            .filter(|r| r.is_due(now))
            .map(|r| r.value().clone())
            .collect();
        due.sort_by_key(|r| r.scheduled_for);
        due.truncate(limit);
        Ok(due)
    }

    async fn mark_processed(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<bool> {
        let Some(mut record) = self.records.get_mut(&id) else {
            return Ok(false);
        };
        if record.is_terminal() {
            return Ok(false);
        }
        record.processed = true;
        record.processed_at = Some(at);
        Ok(true)
    }

    async fn mark_failed(&self, id: Uuid, at: DateTime<Utc>, error: &str) -> AppResult<bool> {
        let Some(mut record) = self.records.get_mut(&id) else {
            return Ok(false);
        };
        if record.is_terminal() {
            return Ok(false);
        }
        record.failed = true;
        record.failed_at = Some(at);
        record.error = Some(error.to_string());
        Ok(true)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<ScheduledNotification>> {
        Ok(self.records.get(&id).map(|r| r.clone()))
    }
}
