//! Hydration event repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use hydrate_core::error::{AppError, ErrorKind};
use hydrate_core::result::AppResult;
use hydrate_entity::hydration::HydrationEvent;

use crate::store::EventStore;

/// Repository over the `hydration_events` table.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn list_events(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<HydrationEvent>> {
        sqlx::query_as::<_, HydrationEvent>(
            "SELECT id, user_id, amount_ml, occurred_at FROM hydration_events \
             WHERE user_id = $1 AND occurred_at >= $2 AND occurred_at < $3 \
             ORDER BY occurred_at ASC",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list hydration events", e))
    }

    async fn append(&self, event: &HydrationEvent) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO hydration_events (id, user_id, amount_ml, occurred_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(event.id)
        .bind(event.user_id)
        .bind(event.amount_ml)
        .bind(event.occurred_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append hydration event", e))?;
        Ok(())
    }
}
