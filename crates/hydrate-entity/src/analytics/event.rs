//! Analytics event entity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of analytics event emitted by the reminder engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsEventType {
    /// An interactive reminder was delivered.
    ReminderSent,
    /// A day-split milestone was crossed and celebrated.
    MilestoneReached,
    /// A queued reminder was delivered by the batch runner.
    ScheduledReminderSent,
}

impl AnalyticsEventType {
    /// Return the event type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReminderSent => "reminder_sent",
            Self::MilestoneReached => "milestone_reached",
            Self::ScheduledReminderSent => "scheduled_reminder_sent",
        }
    }
}

impl fmt::Display for AnalyticsEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fire-and-forget analytics record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// The user the event concerns.
    pub user_id: Uuid,
    /// Event kind.
    pub event_type: AnalyticsEventType,
    /// Free-form structured payload.
    pub payload: serde_json::Value,
    /// When the event was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// Build an event stamped with the given time.
    pub fn new(
        user_id: Uuid,
        event_type: AnalyticsEventType,
        payload: serde_json::Value,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            event_type,
            payload,
            recorded_at,
        }
    }
}
