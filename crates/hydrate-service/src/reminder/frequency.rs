//! Reminder cadence decisions.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use hydrate_core::config::TierIntervals;
use hydrate_entity::notification::{FrequencyTier, LastNotified, NotificationCategory};

/// Progress below this percentage uses the shortest tier interval.
const LOW_PROGRESS_PERCENT: f64 = 25.0;
/// Progress above this percentage uses the longest tier interval.
const HIGH_PROGRESS_PERCENT: f64 = 50.0;

/// Pick the interval (minutes) from an ascending tier list for the given
/// progress. `None` for an empty list.
pub fn select_interval(intervals: &[i64], progress_percent: f64) -> Option<i64> {
    if intervals.is_empty() {
        return None;
    }
    let index = if progress_percent.is_nan() || progress_percent < LOW_PROGRESS_PERCENT {
        0
    } else if progress_percent <= HIGH_PROGRESS_PERCENT {
        intervals.len() / 2
    } else {
        intervals.len() - 1
    };
    Some(intervals[index])
}

/// Decides whether a reminder is due. Holds only the tier table, so
/// every decision is a pure function of its arguments.
#[derive(Debug, Clone, Default)]
pub struct FrequencyPolicy {
    tiers: TierIntervals,
}

impl FrequencyPolicy {
    /// Creates a policy over the configured tier intervals.
    pub fn new(tiers: TierIntervals) -> Self {
        Self { tiers }
    }

    /// The interval, in minutes, that applies right now.
    pub fn interval_minutes(
        &self,
        category: NotificationCategory,
        custom_intervals: &HashMap<NotificationCategory, i64>,
        tier: FrequencyTier,
        progress_percent: f64,
    ) -> Option<i64> {
        match custom_intervals.get(&category).copied() {
            Some(custom) if custom > 0 => Some(custom),
            _ => select_interval(tier.intervals(&self.tiers), progress_percent),
        }
    }

    /// Whether enough time has passed since the last reminder.
    pub fn is_due(
        &self,
        last_notified: LastNotified,
        category: NotificationCategory,
        custom_intervals: &HashMap<NotificationCategory, i64>,
        tier: FrequencyTier,
        progress_percent: f64,
        now: DateTime<Utc>,
    ) -> bool {
        let last = match last_notified {
            LastNotified::Never => return true,
            LastNotified::At(at) => at,
        };
        match self.interval_minutes(category, custom_intervals, tier, progress_percent) {
            Some(minutes) => now - last >= Duration::minutes(minutes),
            None => true,
        }
    }
}
