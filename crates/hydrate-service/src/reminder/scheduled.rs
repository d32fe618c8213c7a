//! Delivery of pre-planned queue records.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use hydrate_core::error::AppError;
use hydrate_core::result::AppResult;
use hydrate_database::store::{PreferencesStore, StreakStore};
use hydrate_entity::analytics::AnalyticsEventType;
use hydrate_entity::notification::{
    DeliveryMethod, DeliveryOutcome, PreferencesUpdate, ScheduledNotification,
};

use crate::analytics::AnalyticsRecorder;
use crate::delivery::{DeliveryDispatcher, OutboundMessage};
use crate::hydration::ProgressSnapshot;
use crate::message::{MessageComposer, MessageStats};

/// Sends one scheduled record using the stats captured when it was planned.
///
/// Frequency and milestone gates were applied by the planner and are not
/// re-evaluated here.
#[derive(Debug, Clone)]
pub struct ScheduledDelivery {
    preferences: Arc<dyn PreferencesStore>,
    streaks: Arc<dyn StreakStore>,
    composer: MessageComposer,
    dispatcher: DeliveryDispatcher,
    analytics: AnalyticsRecorder,
}

impl ScheduledDelivery {
    /// Creates a new scheduled delivery service.
    pub fn new(
        preferences: Arc<dyn PreferencesStore>,
        streaks: Arc<dyn StreakStore>,
        composer: MessageComposer,
        dispatcher: DeliveryDispatcher,
        analytics: AnalyticsRecorder,
    ) -> Self {
        Self {
            preferences,
            streaks,
            composer,
            dispatcher,
            analytics,
        }
    }

    /// Compose and dispatch the record.
    ///
    /// Returns `Err` when the record can never be delivered (unknown user,
    /// reminders switched off, invalid stats). A completed dispatch is
    /// returned as-is, successful or not.
    pub async fn deliver(
        &self,
        record: &ScheduledNotification,
        now: DateTime<Utc>,
    ) -> AppResult<DeliveryOutcome> {
        if record.goal_ml <= 0 {
            return Err(AppError::validation(format!(
                "Scheduled notification {} has non-positive goal {}",
                record.id, record.goal_ml
            )));
        }
        if record.current_ml < 0 {
            return Err(AppError::validation(format!(
                "Scheduled notification {} has negative intake {}",
                record.id, record.current_ml
            )));
        }

        let prefs = self.preferences.get(record.user_id).await?.ok_or_else(|| {
            AppError::not_found(format!(
                "Reminders are not configured for user {}",
                record.user_id
            ))
        })?;
        if !prefs.enabled {
            return Err(AppError::validation(format!(
                "Reminders are disabled for user {}",
                record.user_id
            )));
        }

        let streak = self
            .streaks
            .get(record.user_id)
            .await?
            .map(|s| s.current_streak)
            .unwrap_or(0);
        let current_ml = i64::from(record.current_ml);
        let goal_ml = i64::from(record.goal_ml);
        let stats = MessageStats {
            current_ml,
            goal_ml,
            percent: ProgressSnapshot::percent_of(current_ml, goal_ml),
            streak,
        };

        let composed = self
            .composer
            .compose(
                record.category,
                record.tone,
                &stats,
                self.dispatcher.budget_channel(&prefs),
                None,
            )
            .await;
        let outbound = OutboundMessage {
            title: composed.title,
            body: composed.body,
            category: record.category,
            confetti: false,
        };

        let outcome = self
            .dispatcher
            .send(record.user_id, &outbound, DeliveryMethod::Auto, &prefs)
            .await;

        if outcome.success {
            self.analytics
                .record(
                    record.user_id,
                    AnalyticsEventType::ScheduledReminderSent,
                    serde_json::json!({
                        "notification_id": record.id,
                        "category": record.category,
                        "tone": record.tone,
                        "channel": outcome.channel_attempted,
                        "scheduled_for": record.scheduled_for,
                    }),
                    now,
                )
                .await;

            if let Err(e) = self
                .preferences
                .update(record.user_id, &PreferencesUpdate::notified_at(now))
                .await
            {
                warn!(user_id = %record.user_id, error = %e, "Failed to update last notification time");
            }

            info!(
                notification_id = %record.id,
                user_id = %record.user_id,
                channel = %outcome.channel_attempted,
                "Scheduled reminder sent"
            );
        }

        Ok(outcome)
    }
}
