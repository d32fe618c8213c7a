//! Milestone record repository.

use async_trait::async_trait;
use sqlx::PgPool;

use hydrate_core::error::{AppError, ErrorKind};
use hydrate_core::result::AppResult;
use hydrate_entity::notification::{MilestoneKey, MilestoneRecord};

use crate::store::MilestoneStore;

/// Repository over the `milestone_records` table.
///
/// The table's primary key is the full milestone key, so creation is a
/// single `INSERT .. ON CONFLICT DO NOTHING`.
#[derive(Debug, Clone)]
pub struct MilestoneRepository {
    pool: PgPool,
}

impl MilestoneRepository {
    /// Create a new milestone repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MilestoneStore for MilestoneRepository {
    async fn exists(&self, key: &MilestoneKey) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM milestone_records \
             WHERE user_id = $1 AND calendar_date = $2 AND split_time = $3 AND target_ml = $4)",
        )
        .bind(key.user_id)
        .bind(key.calendar_date)
        .bind(key.split_time)
        .bind(key.target_ml)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check milestone record", e))
    }

    async fn create_if_absent(&self, record: &MilestoneRecord) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO milestone_records \
             (user_id, calendar_date, split_time, target_ml, label, reached_ml, notified_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) ON CONFLICT DO NOTHING",
        )
        .bind(record.key.user_id)
        .bind(record.key.calendar_date)
        .bind(record.key.split_time)
        .bind(record.key.target_ml)
        .bind(&record.label)
        .bind(record.reached_ml)
        .bind(record.notified_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create milestone record", e))?;
        Ok(result.rows_affected() == 1)
    }
}
