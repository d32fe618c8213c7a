//! Day-split milestone detection with per-day idempotency.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use hydrate_core::result::AppResult;
use hydrate_database::store::MilestoneStore;
use hydrate_entity::notification::{DaySplit, MilestoneKey, MilestoneRecord};

/// Detects newly crossed day splits. The milestone store is the only
/// source of truth for "already notified today".
#[derive(Debug, Clone)]
pub struct MilestoneTracker {
    store: Arc<dyn MilestoneStore>,
}

impl MilestoneTracker {
    /// Creates a new milestone tracker.
    pub fn new(store: Arc<dyn MilestoneStore>) -> Self {
        Self { store }
    }

    /// Return the first split, in configured order, that the user crossed
    /// and has not been notified about today, recording it atomically.
    ///
    /// A lost create race or a failed create counts as already notified
    /// and evaluation moves to the next split.
    pub async fn check(
        &self,
        user_id: Uuid,
        splits: &[DaySplit],
        current_ml: i64,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> AppResult<Option<DaySplit>> {
        let local = now.with_timezone(&offset).naive_local();
        let today = local.date();
        let time_of_day = local.time();

        for split in splits {
            if time_of_day < split.time_of_day || current_ml < i64::from(split.target_ml) {
                continue;
            }

            let key = MilestoneKey::for_split(user_id, today, split);
            if self.store.exists(&key).await? {
                continue;
            }

            let record = MilestoneRecord::new(key, split, current_ml, now);
            match self.store.create_if_absent(&record).await {
                Ok(true) => {
                    info!(
                        user_id = %user_id,
                        split = %split.time_label(),
                        target_ml = split.target_ml,
                        current_ml,
                        "Milestone reached"
                    );
                    return Ok(Some(split.clone()));
                }
                Ok(false) => {
                    debug!(key = %key.storage_key(), "Milestone already recorded concurrently");
                }
                Err(e) => {
                    warn!(key = %key.storage_key(), error = %e, "Failed to record milestone, treating as notified");
                }
            }
        }

        Ok(None)
    }

    /// Every split newly crossed right now, in configured order.
    pub async fn check_all(
        &self,
        user_id: Uuid,
        splits: &[DaySplit],
        current_ml: i64,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> AppResult<Vec<DaySplit>> {
        let mut reached = Vec::new();
        for _ in 0..splits.len() {
            match self.check(user_id, splits, current_ml, now, offset).await? {
                Some(split) => reached.push(split),
                None => break,
            }
        }
        Ok(reached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};
    use hydrate_database::memory::MemoryMilestoneStore;

    use crate::test_support::FailingMilestoneStore;

    fn split(h: u32, m: u32, target_ml: i32) -> DaySplit {
        DaySplit::new(NaiveTime::from_hms_opt(h, m, 0).unwrap(), target_ml, format!("{h:02}:{m:02}"))
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[tokio::test]
    async fn test_fires_once_per_day() {
        let tracker = MilestoneTracker::new(Arc::new(MemoryMilestoneStore::new()));
        let user = Uuid::new_v4();
        let splits = vec![split(10, 0, 1000)];
        let now = Utc.with_ymd_and_hms(2026, 10, 14, 10, 15, 0).unwrap();

        let first = tracker.check(user, &splits, 1200, now, utc()).await.unwrap();
        assert_eq!(first, Some(splits[0].clone()));

        let second = tracker.check(user, &splits, 1300, now, utc()).await.unwrap();
        assert_eq!(second, None);
    }

    #[tokio::test]
    async fn test_fires_again_next_day() {
        let tracker = MilestoneTracker::new(Arc::new(MemoryMilestoneStore::new()));
        let user = Uuid::new_v4();
        let splits = vec![split(10, 0, 1000)];
        let day_one = Utc.with_ymd_and_hms(2026, 10, 14, 11, 0, 0).unwrap();

        assert!(tracker.check(user, &splits, 1000, day_one, utc()).await.unwrap().is_some());
        let day_two = day_one + chrono::Duration::days(1);
        assert!(tracker.check(user, &splits, 1000, day_two, utc()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_requires_time_and_volume() {
        let tracker = MilestoneTracker::new(Arc::new(MemoryMilestoneStore::new()));
        let user = Uuid::new_v4();
        let splits = vec![split(10, 0, 1000)];

        let early = Utc.with_ymd_and_hms(2026, 10, 14, 9, 59, 0).unwrap();
        assert!(tracker.check(user, &splits, 5000, early, utc()).await.unwrap().is_none());

        let on_time = Utc.with_ymd_and_hms(2026, 10, 14, 10, 0, 0).unwrap();
        assert!(tracker.check(user, &splits, 999, on_time, utc()).await.unwrap().is_none());
        assert!(tracker.check(user, &splits, 1000, on_time, utc()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_uses_local_time() {
        let tracker = MilestoneTracker::new(Arc::new(MemoryMilestoneStore::new()));
        let splits = vec![split(10, 0, 500)];
        // 08:30 UTC is 10:30 at +02:00.
        let now = Utc.with_ymd_and_hms(2026, 10, 14, 8, 30, 0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        assert!(tracker.check(Uuid::new_v4(), &splits, 600, now, utc()).await.unwrap().is_none());
        assert!(tracker.check(Uuid::new_v4(), &splits, 600, now, plus_two).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_one_split_per_call_and_check_all() {
        let tracker = MilestoneTracker::new(Arc::new(MemoryMilestoneStore::new()));
        let user = Uuid::new_v4();
        let splits = vec![split(8, 0, 500), split(12, 0, 1000), split(16, 0, 1500)];
        let now = Utc.with_ymd_and_hms(2026, 10, 14, 13, 0, 0).unwrap();

        let first = tracker.check(user, &splits, 1200, now, utc()).await.unwrap();
        assert_eq!(first, Some(splits[0].clone()));

        let rest = tracker.check_all(user, &splits, 1200, now, utc()).await.unwrap();
        assert_eq!(rest, vec![splits[1].clone()]);
    }

    #[tokio::test]
    async fn test_create_failure_treated_as_notified() {
        let tracker = MilestoneTracker::new(Arc::new(FailingMilestoneStore));
        let splits = vec![split(10, 0, 1000)];
        let now = Utc.with_ymd_and_hms(2026, 10, 14, 10, 15, 0).unwrap();

        let result = tracker.check(Uuid::new_v4(), &splits, 1200, now, utc()).await.unwrap();
        assert!(result.is_none());
    }
}
