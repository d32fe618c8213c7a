//! Per-user progress: today's total and the persisted streak.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use hydrate_core::result::AppResult;
use hydrate_database::store::{EventStore, StreakStore};
use hydrate_entity::hydration::StreakState;
use hydrate_entity::notification::NotificationPreferences;

use super::aggregator::{StreakSummary, compute_streak, daily_totals, day_bounds, local_date};

/// Progress for one user at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    /// Volume logged so far today.
    pub today_ml: i64,
    /// The user's daily goal.
    pub goal_ml: i64,
    /// `today_ml` as a percentage of the goal, 0 when the goal is unset.
    pub percent: f64,
    /// Streak after merging with the stored state.
    pub streak: StreakState,
    /// Whether `streak` differs from what is stored.
    pub streak_changed: bool,
}

impl ProgressSnapshot {
    /// Percentage for a volume against a goal.
    pub fn percent_of(current_ml: i64, goal_ml: i64) -> f64 {
        if goal_ml <= 0 {
            return 0.0;
        }
        current_ml as f64 * 100.0 / goal_ml as f64
    }
}

/// Loads a user's recent log and computes progress against the stored
/// streak. Reading never writes; [`ProgressTracker::persist_streak`] does.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    events: Arc<dyn EventStore>,
    streaks: Arc<dyn StreakStore>,
    history_days: i64,
}

impl ProgressTracker {
    /// Creates a new progress tracker.
    pub fn new(
        events: Arc<dyn EventStore>,
        streaks: Arc<dyn StreakStore>,
        history_days: i64,
    ) -> Self {
        Self {
            events,
            streaks,
            history_days: history_days.max(1),
        }
    }

    /// Today's total and the recomputed streak for the user.
    pub async fn snapshot(
        &self,
        prefs: &NotificationPreferences,
        now: DateTime<Utc>,
    ) -> AppResult<ProgressSnapshot> {
        let offset = prefs.offset();
        let today = local_date(now, offset);
        let first_day = today - Duration::days(self.history_days - 1);
        let (from, _) = day_bounds(first_day, offset);
        let (_, to) = day_bounds(today, offset);

        let events = self.events.list_events(prefs.user_id, from, to).await?;
        let totals = daily_totals(&events, offset);
        let today_ml = totals.get(&today).copied().unwrap_or(0);
        let goal_ml = i64::from(prefs.daily_goal_ml);

        let summary = compute_streak(&totals, goal_ml, today);
        let (streak, streak_changed) = self.merge_streak(prefs.user_id, summary, now).await?;

        Ok(ProgressSnapshot {
            today_ml,
            goal_ml,
            percent: ProgressSnapshot::percent_of(today_ml, goal_ml),
            streak,
            streak_changed,
        })
    }

    /// Store the snapshot's streak if it changed.
    pub async fn persist_streak(&self, snapshot: &ProgressSnapshot) -> AppResult<()> {
        if !snapshot.streak_changed {
            return Ok(());
        }
        debug!(
            user_id = %snapshot.streak.user_id,
            current = snapshot.streak.current_streak,
            longest = snapshot.streak.longest_streak,
            "Streak changed"
        );
        self.streaks.save(&snapshot.streak).await
    }

    async fn merge_streak(
        &self,
        user_id: Uuid,
        summary: StreakSummary,
        now: DateTime<Utc>,
    ) -> AppResult<(StreakState, bool)> {
        let stored = self
            .streaks
            .get(user_id)
            .await?
            .unwrap_or_else(|| StreakState::empty(user_id));

        let merged = stored.merged(
            summary.current,
            summary.longest,
            summary.last_qualifying_date,
            now,
        );

        let changed = !merged.same_counts(&stored);
        Ok((merged, changed))
    }
}
