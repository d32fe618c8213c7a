//! Milestone idempotency records.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::split::DaySplit;

/// Composite key identifying "this split, for this user, on this day".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MilestoneKey {
    /// Owner of the milestone.
    pub user_id: Uuid,
    /// Local calendar date the split belongs to.
    pub calendar_date: NaiveDate,
    /// The split's time of day.
    pub split_time: NaiveTime,
    /// The split's volume target.
    pub target_ml: i32,
}

impl MilestoneKey {
    /// Key for a split on a given day.
    pub fn for_split(user_id: Uuid, calendar_date: NaiveDate, split: &DaySplit) -> Self {
        Self {
            user_id,
            calendar_date,
            split_time: split.time_of_day,
            target_ml: split.target_ml,
        }
    }

    /// Flat string form, `user:date:HH:MM:target`.
    pub fn storage_key(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.user_id,
            self.calendar_date.format("%Y-%m-%d"),
            self.split_time.format("%H:%M"),
            self.target_ml
        )
    }
}

/// Existence of a record means the split was already celebrated that day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneRecord {
    /// Composite key.
    pub key: MilestoneKey,
    /// The split label at the time of notification.
    pub label: String,
    /// Volume that triggered the milestone.
    pub reached_ml: i64,
    /// When the record was created.
    pub notified_at: DateTime<Utc>,
}

impl MilestoneRecord {
    /// Build a record for a split crossed at `notified_at`.
    pub fn new(key: MilestoneKey, split: &DaySplit, reached_ml: i64, notified_at: DateTime<Utc>) -> Self {
        Self {
            key,
            label: split.label.clone(),
            reached_ml,
            notified_at,
        }
    }
}
