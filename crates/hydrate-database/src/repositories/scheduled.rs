//! Scheduled notification queue repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use hydrate_core::error::{AppError, ErrorKind};
use hydrate_core::result::AppResult;
use hydrate_entity::notification::ScheduledNotification;

use crate::store::NotificationQueue;

const SELECT_COLUMNS: &str = "id, user_id, category, scheduled_for, current_ml, goal_ml, tone, \
     processed, failed, processed_at, failed_at, error, created_at";

#[derive(Debug, sqlx::FromRow)]
struct ScheduledRow {
    id: Uuid,
    user_id: Uuid,
    category: String,
    scheduled_for: DateTime<Utc>,
    current_ml: i32,
    goal_ml: i32,
    tone: String,
    processed: bool,
    failed: bool,
    processed_at: Option<DateTime<Utc>>,
    failed_at: Option<DateTime<Utc>>,
    error: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ScheduledRow> for ScheduledNotification {
    type Error = AppError;

    fn try_from(row: ScheduledRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            category: row.category.parse()?,
            scheduled_for: row.scheduled_for,
            current_ml: row.current_ml,
            goal_ml: row.goal_ml,
            tone: row.tone.parse()?,
            processed: row.processed,
            failed: row.failed,
            processed_at: row.processed_at,
            failed_at: row.failed_at,
            error: row.error,
            created_at: row.created_at,
        })
    }
}

/// Split fetched rows into readable records and rows that failed to parse.
fn partition_rows(rows: Vec<ScheduledRow>) -> (Vec<ScheduledNotification>, Vec<(Uuid, AppError)>) {
    let mut due = Vec::with_capacity(rows.len());
    let mut unreadable = Vec::new();
    for row in rows {
        let id = row.id;
        match ScheduledNotification::try_from(row) {
            Ok(record) => due.push(record),
            Err(e) => unreadable.push((id, e)),
        }
    }
    (due, unreadable)
}

/// Repository over the `scheduled_notifications` table.
///
/// Terminal updates only match pending rows, so two concurrent runners
/// cannot both finalize the same record.
#[derive(Debug, Clone)]
pub struct ScheduledNotificationRepository {
    pool: PgPool,
}

impl ScheduledNotificationRepository {
    /// Create a new scheduled notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationQueue for ScheduledNotificationRepository {
    async fn enqueue(&self, record: &ScheduledNotification) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO scheduled_notifications \
             (id, user_id, category, scheduled_for, current_ml, goal_ml, tone, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(record.category.as_str())
        .bind(record.scheduled_for)
        .bind(record.current_ml)
        .bind(record.goal_ml)
        .bind(record.tone.as_str())
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to enqueue notification", e))?;
        Ok(())
    }

    async fn fetch_due(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> AppResult<Vec<ScheduledNotification>> {
        let rows = sqlx::query_as::<_, ScheduledRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM scheduled_notifications \
             WHERE scheduled_for <= $1 AND processed = FALSE AND failed = FALSE \
             ORDER BY scheduled_for ASC LIMIT $2"
        ))
        .bind(now)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch due notifications", e))?;

        // An unreadable row would otherwise stay at the head of the queue forever.
        let (due, unreadable) = partition_rows(rows);
        for (id, e) in unreadable {
            warn!(notification_id = %id, error = %e, "Marking unreadable scheduled notification failed");
            if let Err(mark_err) = self.mark_failed(id, now, &e.to_string()).await {
                warn!(notification_id = %id, error = %mark_err, "Could not mark unreadable notification");
            }
        }
        Ok(due)
    }

    async fn mark_processed(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE scheduled_notifications SET processed = TRUE, processed_at = $2 \
             WHERE id = $1 AND processed = FALSE AND failed = FALSE",
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark notification processed", e))?;
        Ok(result.rows_affected() == 1)
    }

    async fn mark_failed(&self, id: Uuid, at: DateTime<Utc>, error: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE scheduled_notifications SET failed = TRUE, failed_at = $2, error = $3 \
             WHERE id = $1 AND processed = FALSE AND failed = FALSE",
        )
        .bind(id)
        .bind(at)
        .bind(error)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark notification failed", e))?;
        Ok(result.rows_affected() == 1)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<ScheduledNotification>> {
        let row = sqlx::query_as::<_, ScheduledRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM scheduled_notifications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find notification", e))?;

        row.map(ScheduledNotification::try_from).transpose()
    }
}
