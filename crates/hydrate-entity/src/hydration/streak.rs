//! Persisted streak state.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Consecutive-day goal streak for a user.
///
/// `longest_streak >= current_streak` holds for every value produced by
/// [`StreakState::merged`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Owner of the streak.
    pub user_id: Uuid,
    /// Run of qualifying days ending today or yesterday.
    pub current_streak: u32,
    /// Best run ever observed.
    pub longest_streak: u32,
    /// Most recent day whose total met the goal.
    pub last_qualifying_date: Option<NaiveDate>,
    /// When the state was last recomputed.
    pub updated_at: DateTime<Utc>,
}

impl StreakState {
    /// A zeroed streak for a user with no history.
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            current_streak: 0,
            longest_streak: 0,
            last_qualifying_date: None,
            updated_at: Utc::now(),
        }
    }

    /// Combine a freshly computed streak with the stored one, keeping the
    /// longest streak monotonic.
    pub fn merged(
        &self,
        current: u32,
        longest: u32,
        last_qualifying_date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: self.user_id,
            current_streak: current,
            longest_streak: self.longest_streak.max(longest).max(current),
            last_qualifying_date: last_qualifying_date.or(self.last_qualifying_date),
            updated_at: now,
        }
    }

    /// Whether two states differ in anything but the timestamp.
    pub fn same_counts(&self, other: &Self) -> bool {
        self.current_streak == other.current_streak
            && self.longest_streak == other.longest_streak
            && self.last_qualifying_date == other.last_qualifying_date
    }
}
