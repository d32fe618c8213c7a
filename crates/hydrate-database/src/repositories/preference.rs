//! Notification preference repository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use hydrate_core::error::{AppError, ErrorKind};
use hydrate_core::result::AppResult;
use hydrate_entity::notification::{
    DaySplit, NotificationCategory, NotificationPreferences, PreferencesUpdate,
};

use crate::store::PreferencesStore;

const SELECT_COLUMNS: &str = "user_id, enabled, push_enabled, sms_enabled, push_token, phone_number, \
     frequency_tier, enabled_categories, custom_interval_minutes, day_splits, \
     last_notification_at, tone, daily_goal_ml, utc_offset_minutes";

#[derive(Debug, sqlx::FromRow)]
struct PreferencesRow {
    user_id: Uuid,
    enabled: bool,
    push_enabled: bool,
    sms_enabled: bool,
    push_token: Option<String>,
    phone_number: Option<String>,
    frequency_tier: String,
    enabled_categories: Json<Vec<NotificationCategory>>,
    custom_interval_minutes: Json<HashMap<NotificationCategory, i64>>,
    day_splits: Json<Vec<DaySplit>>,
    last_notification_at: Option<DateTime<Utc>>,
    tone: String,
    daily_goal_ml: i32,
    utc_offset_minutes: i32,
}

impl TryFrom<PreferencesRow> for NotificationPreferences {
    type Error = AppError;

    fn try_from(row: PreferencesRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: row.user_id,
            enabled: row.enabled,
            push_enabled: row.push_enabled,
            sms_enabled: row.sms_enabled,
            push_token: row.push_token,
            phone_number: row.phone_number,
            frequency_tier: row.frequency_tier.parse()?,
            enabled_categories: row.enabled_categories.0,
            custom_interval_minutes: row.custom_interval_minutes.0,
            day_splits: row.day_splits.0,
            last_notification_at: row.last_notification_at.into(),
            tone: row.tone.parse()?,
            daily_goal_ml: row.daily_goal_ml,
            utc_offset_minutes: row.utc_offset_minutes,
        })
    }
}

/// Repository over the `notification_preferences` table.
#[derive(Debug, Clone)]
pub struct PreferencesRepository {
    pool: PgPool,
}

impl PreferencesRepository {
    /// Create a new preference repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferencesStore for PreferencesRepository {
    async fn get(&self, user_id: Uuid) -> AppResult<Option<NotificationPreferences>> {
        let row = sqlx::query_as::<_, PreferencesRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM notification_preferences WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find preferences", e))?;

        row.map(NotificationPreferences::try_from).transpose()
    }

    async fn update(&self, user_id: Uuid, update: &PreferencesUpdate) -> AppResult<()> {
        let set_last = update.last_notification_at.is_some();
        let last_at = update.last_notification_at.and_then(|l| l.as_option());

        let result = sqlx::query(
            "UPDATE notification_preferences SET \
             last_notification_at = CASE WHEN $2 THEN $3 ELSE last_notification_at END, \
             tone = COALESCE($4, tone), \
             frequency_tier = COALESCE($5, frequency_tier), \
             push_enabled = COALESCE($6, push_enabled), \
             sms_enabled = COALESCE($7, sms_enabled), \
             updated_at = NOW() \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(set_last)
        .bind(last_at)
        .bind(update.tone.map(|t| t.as_str()))
        .bind(update.frequency_tier.map(|t| t.as_str()))
        .bind(update.push_enabled)
        .bind(update.sms_enabled)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update preferences", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "No notification preferences for user {user_id}"
            )));
        }
        Ok(())
    }

    async fn upsert(&self, prefs: &NotificationPreferences) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO notification_preferences \
             (user_id, enabled, push_enabled, sms_enabled, push_token, phone_number, frequency_tier, \
              enabled_categories, custom_interval_minutes, day_splits, last_notification_at, tone, \
              daily_goal_ml, utc_offset_minutes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             ON CONFLICT (user_id) DO UPDATE SET \
             enabled = EXCLUDED.enabled, push_enabled = EXCLUDED.push_enabled, \
             sms_enabled = EXCLUDED.sms_enabled, push_token = EXCLUDED.push_token, \
             phone_number = EXCLUDED.phone_number, frequency_tier = EXCLUDED.frequency_tier, \
             enabled_categories = EXCLUDED.enabled_categories, \
             custom_interval_minutes = EXCLUDED.custom_interval_minutes, \
             day_splits = EXCLUDED.day_splits, last_notification_at = EXCLUDED.last_notification_at, \
             tone = EXCLUDED.tone, daily_goal_ml = EXCLUDED.daily_goal_ml, \
             utc_offset_minutes = EXCLUDED.utc_offset_minutes, updated_at = NOW()",
        )
        .bind(prefs.user_id)
        .bind(prefs.enabled)
        .bind(prefs.push_enabled)
        .bind(prefs.sms_enabled)
        .bind(&prefs.push_token)
        .bind(&prefs.phone_number)
        .bind(prefs.frequency_tier.as_str())
        .bind(Json(&prefs.enabled_categories))
        .bind(Json(&prefs.custom_interval_minutes))
        .bind(Json(&prefs.day_splits))
        .bind(prefs.last_notification_at.as_option())
        .bind(prefs.tone.as_str())
        .bind(prefs.daily_goal_ml)
        .bind(prefs.utc_offset_minutes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert preferences", e))?;
        Ok(())
    }
}
