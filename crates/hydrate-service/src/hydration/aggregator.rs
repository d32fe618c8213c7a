//! Pure aggregation over a user's hydration log.
//!
//! Calendar days are evaluated in the user's fixed UTC offset. None of
//! these functions fail.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use hydrate_entity::hydration::HydrationEvent;

/// Result of a streak computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    /// Consecutive qualifying days ending today, or yesterday while today
    /// is still in progress.
    pub current: u32,
    /// Longest run anywhere in the supplied history. Never below `current`.
    pub longest: u32,
    /// Most recent qualifying day on or before today.
    pub last_qualifying_date: Option<NaiveDate>,
}

/// The local calendar day an instant falls on.
pub fn local_date(at: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    at.with_timezone(&offset).date_naive()
}

/// UTC instants bounding the local day `[start, end)`.
pub fn day_bounds(day: NaiveDate, offset: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
    let shift = Duration::seconds(i64::from(offset.local_minus_utc()));
    let start = day.and_time(NaiveTime::MIN) - shift;
    let start = DateTime::<Utc>::from_naive_utc_and_offset(start, Utc);
    (start, start + Duration::days(1))
}

/// Sum of `amount_ml` for events on the given local day.
pub fn daily_total(events: &[HydrationEvent], day: NaiveDate, offset: FixedOffset) -> i64 {
    events
        .iter()
        .filter(|e| local_date(e.occurred_at, offset) == day)
        .map(|e| i64::from(e.amount_ml))
        .sum()
}

/// Totals grouped by local calendar day.
pub fn daily_totals(events: &[HydrationEvent], offset: FixedOffset) -> BTreeMap<NaiveDate, i64> {
    let mut totals = BTreeMap::new();
    for event in events {
        *totals
            .entry(local_date(event.occurred_at, offset))
            .or_insert(0) += i64::from(event.amount_ml);
    }
    totals
}

/// Compute the current and longest streak from per-day totals.
///
/// A day qualifies when its total reaches `goal_ml`. Days after `today`
/// are ignored. A non-positive goal never qualifies.
pub fn compute_streak(
    totals: &BTreeMap<NaiveDate, i64>,
    goal_ml: i64,
    today: NaiveDate,
) -> StreakSummary {
    if goal_ml <= 0 {
        return StreakSummary::default();
    }

    let qualifies = |day: NaiveDate| totals.get(&day).is_some_and(|t| *t >= goal_ml);

    let anchor = if qualifies(today) {
        Some(today)
    } else {
        today.pred_opt().filter(|d| qualifies(*d))
    };

    let mut current = 0u32;
    let mut cursor = anchor;
    while let Some(day) = cursor.filter(|d| qualifies(*d)) {
        current += 1;
        cursor = day.pred_opt();
    }

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut previous: Option<NaiveDate> = None;
    let mut last_qualifying_date = None;
    for (&day, &total) in totals.range(..=today) {
        if total < goal_ml {
            continue;
        }
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
        last_qualifying_date = Some(day);
    }

    StreakSummary {
        current,
        longest: longest.max(current),
        last_qualifying_date,
    }
}
