//! Streak repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use hydrate_core::error::{AppError, ErrorKind};
use hydrate_core::result::AppResult;
use hydrate_entity::hydration::StreakState;

use crate::store::StreakStore;

#[derive(Debug, sqlx::FromRow)]
struct StreakRow {
    user_id: Uuid,
    current_streak: i32,
    longest_streak: i32,
    last_qualifying_date: Option<NaiveDate>,
    updated_at: DateTime<Utc>,
}

impl From<StreakRow> for StreakState {
    fn from(row: StreakRow) -> Self {
        Self {
            user_id: row.user_id,
            current_streak: u32::try_from(row.current_streak).unwrap_or(0),
            longest_streak: u32::try_from(row.longest_streak).unwrap_or(0),
            last_qualifying_date: row.last_qualifying_date,
            updated_at: row.updated_at,
        }
    }
}

/// Repository over the `streaks` table.
#[derive(Debug, Clone)]
pub struct StreakRepository {
    pool: PgPool,
}

impl StreakRepository {
    /// Create a new streak repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StreakStore for StreakRepository {
    async fn get(&self, user_id: Uuid) -> AppResult<Option<StreakState>> {
        let row = sqlx::query_as::<_, StreakRow>(
            "SELECT user_id, current_streak, longest_streak, last_qualifying_date, updated_at \
             FROM streaks WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find streak", e))?;
        Ok(row.map(StreakState::from))
    }

    async fn save(&self, state: &StreakState) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO streaks (user_id, current_streak, longest_streak, last_qualifying_date, updated_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id) DO UPDATE SET \
             current_streak = EXCLUDED.current_streak, \
             longest_streak = GREATEST(streaks.longest_streak, EXCLUDED.longest_streak), \
             last_qualifying_date = EXCLUDED.last_qualifying_date, \
             updated_at = EXCLUDED.updated_at",
        )
        .bind(state.user_id)
        .bind(i32::try_from(state.current_streak).unwrap_or(i32::MAX))
        .bind(i32::try_from(state.longest_streak).unwrap_or(i32::MAX))
        .bind(state.last_qualifying_date)
        .bind(state.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save streak", e))?;
        Ok(())
    }
}
