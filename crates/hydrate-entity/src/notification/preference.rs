//! Per-user notification preferences.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::NotificationCategory;
use super::split::DaySplit;
use super::tier::FrequencyTier;
use super::tone::Tone;

/// When the user was last sent a reminder.
///
/// `Never` is the explicit first-reminder state; it is stored as `NULL`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<DateTime<Utc>>", into = "Option<DateTime<Utc>>")]
pub enum LastNotified {
    /// No reminder has ever been sent.
    #[default]
    Never,
    /// The last reminder was sent at this instant.
    At(DateTime<Utc>),
}

impl LastNotified {
    /// The timestamp, if any.
    pub fn as_option(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Never => None,
            Self::At(at) => Some(*at),
        }
    }
}

impl From<Option<DateTime<Utc>>> for LastNotified {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        match value {
            Some(at) => Self::At(at),
            None => Self::Never,
        }
    }
}

impl From<LastNotified> for Option<DateTime<Utc>> {
    fn from(value: LastNotified) -> Self {
        value.as_option()
    }
}

/// Reminder settings for a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    /// The user these preferences belong to.
    pub user_id: Uuid,
    /// Master switch for all reminders.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Whether push delivery is allowed.
    #[serde(default = "default_true")]
    pub push_enabled: bool,
    /// Whether SMS delivery is allowed.
    #[serde(default)]
    pub sms_enabled: bool,
    /// Device registration token for push.
    #[serde(default)]
    pub push_token: Option<String>,
    /// Phone number for SMS, E.164.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Reminder frequency preset.
    #[serde(default)]
    pub frequency_tier: FrequencyTier,
    /// Categories the user wants reminders for.
    #[serde(default = "default_categories")]
    pub enabled_categories: Vec<NotificationCategory>,
    /// Per-category interval overrides, in minutes.
    #[serde(default)]
    pub custom_interval_minutes: HashMap<NotificationCategory, i64>,
    /// Ordered day-split milestone targets.
    #[serde(default)]
    pub day_splits: Vec<DaySplit>,
    /// Last reminder time, updated after each successful send.
    #[serde(default)]
    pub last_notification_at: LastNotified,
    /// Preferred message tone.
    #[serde(default)]
    pub tone: Tone,
    /// Daily intake goal in millilitres.
    #[serde(default = "default_goal")]
    pub daily_goal_ml: i32,
    /// The user's fixed offset from UTC, in minutes. Calendar days and
    /// split times are evaluated in this offset.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl NotificationPreferences {
    /// Default preferences for a new user.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            enabled: true,
            push_enabled: true,
            sms_enabled: false,
            push_token: None,
            phone_number: None,
            frequency_tier: FrequencyTier::default(),
            enabled_categories: default_categories(),
            custom_interval_minutes: HashMap::new(),
            day_splits: Vec::new(),
            last_notification_at: LastNotified::Never,
            tone: Tone::default(),
            daily_goal_ml: default_goal(),
            utc_offset_minutes: 0,
        }
    }

    /// Whether the user opted into a category.
    pub fn is_category_enabled(&self, category: NotificationCategory) -> bool {
        self.enabled_categories.contains(&category)
    }

    /// Push is usable: enabled and a non-blank token is present.
    pub fn push_token(&self) -> Option<&str> {
        if !self.push_enabled {
            return None;
        }
        self.push_token.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// SMS is usable: enabled and a non-blank number is present.
    pub fn sms_number(&self) -> Option<&str> {
        if !self.sms_enabled {
            return None;
        }
        self.phone_number.as_deref().filter(|n| !n.trim().is_empty())
    }

    /// The user's fixed offset. Out-of-range values fall back to UTC.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }
}

/// Partial update applied to stored preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferencesUpdate {
    /// New last-notification time.
    #[serde(default)]
    pub last_notification_at: Option<LastNotified>,
    /// New tone.
    #[serde(default)]
    pub tone: Option<Tone>,
    /// New frequency tier.
    #[serde(default)]
    pub frequency_tier: Option<FrequencyTier>,
    /// New push toggle.
    #[serde(default)]
    pub push_enabled: Option<bool>,
    /// New SMS toggle.
    #[serde(default)]
    pub sms_enabled: Option<bool>,
}

impl PreferencesUpdate {
    /// Update that only records a send time.
    pub fn notified_at(at: DateTime<Utc>) -> Self {
        Self {
            last_notification_at: Some(LastNotified::At(at)),
            ..Self::default()
        }
    }

    /// Apply every present field onto `prefs`.
    pub fn apply(&self, prefs: &mut NotificationPreferences) {
        if let Some(last) = self.last_notification_at {
            prefs.last_notification_at = last;
        }
        if let Some(tone) = self.tone {
            prefs.tone = tone;
        }
        if let Some(tier) = self.frequency_tier {
            prefs.frequency_tier = tier;
        }
        if let Some(push) = self.push_enabled {
            prefs.push_enabled = push;
        }
        if let Some(sms) = self.sms_enabled {
            prefs.sms_enabled = sms;
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_goal() -> i32 {
    2000
}

fn default_categories() -> Vec<NotificationCategory> {
    NotificationCategory::ALL.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_last_notified_serializes_as_nullable_timestamp() {
        let prefs = NotificationPreferences::new(Uuid::nil());
        let value = serde_json::to_value(&prefs).unwrap();
        assert!(value["last_notification_at"].is_null());

        let parsed: NotificationPreferences = serde_json::from_value(serde_json::json!({
            "user_id": Uuid::nil(),
            "last_notification_at": "2026-10-14T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(
            parsed.last_notification_at,
            LastNotified::At(Utc.with_ymd_and_hms(2026, 10, 14, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_blank_push_token_is_unusable() {
        let mut prefs = NotificationPreferences::new(Uuid::nil());
        prefs.push_token = Some("   ".to_string());
        assert!(prefs.push_token().is_none());
        prefs.push_token = Some("tok".to_string());
        assert_eq!(prefs.push_token(), Some("tok"));
        prefs.push_enabled = false;
        assert!(prefs.push_token().is_none());
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_utc() {
        let mut prefs = NotificationPreferences::new(Uuid::nil());
        prefs.utc_offset_minutes = 100_000;
        assert_eq!(prefs.offset(), Utc.fix());
        prefs.utc_offset_minutes = 120;
        assert_eq!(prefs.offset().local_minus_utc(), 7200);
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let mut prefs = NotificationPreferences::new(Uuid::nil());
        let at = Utc.with_ymd_and_hms(2026, 10, 14, 8, 0, 0).unwrap();
        PreferencesUpdate::notified_at(at).apply(&mut prefs);
        assert_eq!(prefs.last_notification_at, LastNotified::At(at));
        assert_eq!(prefs.tone, Tone::Friendly);
    }
}
