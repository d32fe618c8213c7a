//! Interactive, per-request reminder flow.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use hydrate_core::error::AppError;
use hydrate_core::result::AppResult;
use hydrate_database::store::PreferencesStore;
use hydrate_entity::analytics::AnalyticsEventType;
use hydrate_entity::notification::{
    DeliveryChannel, DeliveryMethod, NotificationCategory, PreferencesUpdate, Tone,
};

use crate::analytics::AnalyticsRecorder;
use crate::delivery::{DeliveryDispatcher, OutboundMessage};
use crate::hydration::ProgressTracker;
use crate::message::{MessageComposer, MessageStats};

use super::frequency::FrequencyPolicy;
use super::milestone::MilestoneTracker;

/// A request to send one reminder now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderRequest {
    /// Target user.
    pub user_id: Uuid,
    /// Reminder category.
    pub category: NotificationCategory,
    /// Tone to use instead of the user's preference.
    #[serde(default)]
    pub tone_override: Option<Tone>,
    /// Delivery method instead of `auto`.
    #[serde(default)]
    pub method_override: Option<DeliveryMethod>,
    /// Bypass the frequency gate and leave `last_notification_at` alone.
    #[serde(default)]
    pub test_mode: bool,
}

impl ReminderRequest {
    /// A plain request with no overrides.
    pub fn new(user_id: Uuid, category: NotificationCategory) -> Self {
        Self {
            user_id,
            category,
            tone_override: None,
            method_override: None,
            test_mode: false,
        }
    }
}

/// Why a reminder was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The master toggle is off.
    RemindersDisabled,
    /// The user opted out of this category.
    CategoryDisabled,
    /// No day split was newly crossed.
    NoMilestone,
    /// The applicable interval has not elapsed.
    NotDue,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::RemindersDisabled => "reminders_disabled",
            Self::CategoryDisabled => "category_disabled",
            Self::NoMilestone => "no_milestone",
            Self::NotDue => "not_due",
        };
        f.write_str(s)
    }
}

/// Result of one reminder request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderResult {
    /// Whether at least one channel delivered.
    pub success: bool,
    /// Channel(s) that delivered.
    pub method: DeliveryChannel,
    /// The body that was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_text: Option<String>,
    /// Delivery diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set when a gate short-circuited the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
}

impl ReminderResult {
    /// A short-circuited request.
    pub fn skipped(reason: SkipReason) -> Self {
        Self {
            success: false,
            method: DeliveryChannel::None,
            message_text: None,
            error: None,
            skipped: Some(reason),
        }
    }
}

/// Wires preferences, progress, the frequency and milestone gates,
/// composition, and dispatch into the interactive reminder flow.
#[derive(Debug, Clone)]
pub struct ReminderOrchestrator {
    preferences: Arc<dyn PreferencesStore>,
    progress: ProgressTracker,
    policy: FrequencyPolicy,
    milestones: MilestoneTracker,
    composer: MessageComposer,
    dispatcher: DeliveryDispatcher,
    analytics: AnalyticsRecorder,
}

impl ReminderOrchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        preferences: Arc<dyn PreferencesStore>,
        progress: ProgressTracker,
        policy: FrequencyPolicy,
        milestones: MilestoneTracker,
        composer: MessageComposer,
        dispatcher: DeliveryDispatcher,
        analytics: AnalyticsRecorder,
    ) -> Self {
        Self {
            preferences,
            progress,
            policy,
            milestones,
            composer,
            dispatcher,
            analytics,
        }
    }

    /// Evaluate and, if every gate passes, send one reminder.
    ///
    /// Fails only when the user has no preferences or a store read fails.
    /// A failed dispatch is a successful call with `success: false`; the
    /// stale `last_notification_at` makes the next evaluation retry.
    pub async fn send(
        &self,
        request: &ReminderRequest,
        now: DateTime<Utc>,
    ) -> AppResult<ReminderResult> {
        let user_id = request.user_id;
        let category = request.category;

        let prefs = self.preferences.get(user_id).await?.ok_or_else(|| {
            AppError::not_found(format!("Reminders are not configured for user {user_id}"))
        })?;

        if !prefs.enabled {
            return Ok(self.skip(user_id, category, SkipReason::RemindersDisabled));
        }
        if !prefs.is_category_enabled(category) {
            return Ok(self.skip(user_id, category, SkipReason::CategoryDisabled));
        }

        let progress = self.progress.snapshot(&prefs, now).await?;

        let split = if category == NotificationCategory::Milestone {
            match self
                .milestones
                .check(user_id, &prefs.day_splits, progress.today_ml, now, prefs.offset())
                .await?
            {
                Some(split) => Some(split),
                None => return Ok(self.skip(user_id, category, SkipReason::NoMilestone)),
            }
        } else {
            None
        };

        // A milestone recorded above stays recorded when this gate skips.
        let due = request.test_mode
            || self.policy.is_due(
                prefs.last_notification_at,
                category,
                &prefs.custom_interval_minutes,
                prefs.frequency_tier,
                progress.percent,
                now,
            );
        if !due {
            return Ok(self.skip(user_id, category, SkipReason::NotDue));
        }

        if let Err(e) = self.progress.persist_streak(&progress).await {
            warn!(user_id = %user_id, error = %e, "Failed to save streak");
        }

        let tone = request.tone_override.unwrap_or(prefs.tone);
        let method = request.method_override.unwrap_or_default();
        let stats = MessageStats {
            current_ml: progress.today_ml,
            goal_ml: progress.goal_ml,
            percent: progress.percent,
            streak: progress.streak.current_streak,
        };

        let composed = self
            .composer
            .compose(
                category,
                tone,
                &stats,
                self.dispatcher.budget_channel(&prefs),
                split.as_ref(),
            )
            .await;

        let outbound = OutboundMessage {
            title: composed.title,
            body: composed.body,
            category,
            confetti: split.as_ref().is_some_and(|s| s.confetti_enabled),
        };
        let outcome = self.dispatcher.send(user_id, &outbound, method, &prefs).await;

        if outcome.success {
            self.analytics
                .record(
                    user_id,
                    AnalyticsEventType::ReminderSent,
                    serde_json::json!({
                        "category": category,
                        "tone": tone,
                        "channel": outcome.channel_attempted,
                        "source": composed.source,
                        "test_mode": request.test_mode,
                    }),
                    now,
                )
                .await;

            if let Some(split) = &split {
                self.analytics
                    .record(
                        user_id,
                        AnalyticsEventType::MilestoneReached,
                        serde_json::json!({
                            "split_time": split.time_label(),
                            "target_ml": split.target_ml,
                            "label": split.label,
                            "current_ml": progress.today_ml,
                        }),
                        now,
                    )
                    .await;
            }

            if !request.test_mode {
                if let Err(e) = self
                    .preferences
                    .update(user_id, &PreferencesUpdate::notified_at(now))
                    .await
                {
                    warn!(user_id = %user_id, error = %e, "Failed to update last notification time");
                }
            }

            info!(
                user_id = %user_id,
                category = %category,
                channel = %outcome.channel_attempted,
                "Reminder sent"
            );
        } else {
            warn!(
                user_id = %user_id,
                category = %category,
                error = outcome.error.as_deref().unwrap_or_default(),
                "Reminder not delivered"
            );
        }

        Ok(ReminderResult {
            success: outcome.success,
            method: outcome.channel_attempted,
            message_text: Some(outbound.body),
            error: outcome.error,
            skipped: None,
        })
    }

    fn skip(&self, user_id: Uuid, category: NotificationCategory, reason: SkipReason) -> ReminderResult {
        debug!(user_id = %user_id, category = %category, reason = %reason, "Reminder skipped");
        ReminderResult::skipped(reason)
    }
}
