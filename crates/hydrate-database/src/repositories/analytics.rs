//! Analytics event repository.

use async_trait::async_trait;
use sqlx::PgPool;

use hydrate_core::error::{AppError, ErrorKind};
use hydrate_core::result::AppResult;
use hydrate_entity::analytics::AnalyticsEvent;

use crate::store::AnalyticsSink;

/// Repository over the `analytics_events` table.
#[derive(Debug, Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    /// Create a new analytics repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsSink for AnalyticsRepository {
    async fn record(&self, event: &AnalyticsEvent) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO analytics_events (user_id, event_type, payload, recorded_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(event.user_id)
        .bind(event.event_type.as_str())
        .bind(sqlx::types::Json(&event.payload))
        .bind(event.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record analytics event", e))?;
        Ok(())
    }
}
