//! Queued notification records consumed by the batch runner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::NotificationCategory;
use super::tone::Tone;

/// A pre-planned reminder waiting for its `scheduled_for` time.
///
/// After one processing attempt exactly one of `processed` / `failed` is
/// set and the record is never picked up again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledNotification {
    /// Unique record identifier.
    pub id: Uuid,
    /// Recipient.
    pub user_id: Uuid,
    /// Reminder category.
    pub category: NotificationCategory,
    /// Earliest time the reminder may be sent.
    pub scheduled_for: DateTime<Utc>,
    /// The user's intake when the record was planned.
    pub current_ml: i32,
    /// The user's goal when the record was planned.
    pub goal_ml: i32,
    /// Tone to compose with.
    pub tone: Tone,
    /// Delivered successfully.
    #[serde(default)]
    pub processed: bool,
    /// Processing failed.
    #[serde(default)]
    pub failed: bool,
    /// When the record was marked processed.
    #[serde(default)]
    pub processed_at: Option<DateTime<Utc>>,
    /// When the record was marked failed.
    #[serde(default)]
    pub failed_at: Option<DateTime<Utc>>,
    /// Failure message.
    #[serde(default)]
    pub error: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl ScheduledNotification {
    /// Build a pending record.
    pub fn new(
        user_id: Uuid,
        category: NotificationCategory,
        scheduled_for: DateTime<Utc>,
        current_ml: i32,
        goal_ml: i32,
        tone: Tone,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            category,
            scheduled_for,
            current_ml,
            goal_ml,
            tone,
            processed: false,
            failed: false,
            processed_at: None,
            failed_at: None,
            error: None,
            created_at: Utc::now(),
        }
    }

    /// Whether the record reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.processed || self.failed
    }

    /// Whether the record should be picked up by a run at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.is_terminal() && self.scheduled_for <= now
    }
}
