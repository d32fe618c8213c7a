//! In-memory streak store.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use hydrate_core::result::AppResult;
use hydrate_entity::hydration::StreakState;

use crate::store::StreakStore;

/// Streak state keyed by user.
#[derive(Debug, Default)]
pub struct MemoryStreakStore {
    streaks: DashMap<Uuid, StreakState>,
}

impl MemoryStreakStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StreakStore for MemoryStreakStore {
    async fn get(&self, user_id: Uuid) -> AppResult<Option<StreakState>> {
        Ok(self.streaks.get(&user_id).map(|s| s.clone()))
    }

    async fn save(&self, state: &StreakState) -> AppResult<()> {
        self.streaks
            .entry(state.user_id)
            .and_modify(|stored| {
                let longest = stored.longest_streak.max(state.longest_streak);
                *stored = state.clone();
                stored.longest_streak = longest;
            })
            .or_insert_with(|| state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_never_lowers_longest() {
        let store = MemoryStreakStore::new();
        let mut state = StreakState::empty(Uuid::new_v4());
        state.current_streak = 9;
        state.longest_streak = 9;
        store.save(&state).await.unwrap();

        state.current_streak = 1;
        state.longest_streak = 1;
        store.save(&state).await.unwrap();

        let stored = store.get(state.user_id).await.unwrap().unwrap();
        assert_eq!(stored.current_streak, 1);
        assert_eq!(stored.longest_streak, 9);
    }
}
