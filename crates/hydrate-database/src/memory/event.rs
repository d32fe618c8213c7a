//! In-memory hydration log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use hydrate_core::result::AppResult;
use hydrate_entity::hydration::HydrationEvent;

use crate::store::EventStore;

/// Events grouped per user.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: DashMap<Uuid, Vec<HydrationEvent>>,
}

impl MemoryEventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn list_events(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<HydrationEvent>> {
        let mut found: Vec<HydrationEvent> = self
            .events
            .get(&user_id)
            .map(|list| {
                list.iter()
                    .filter(|e| e.occurred_at >= from && e.occurred_at < to)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        found.sort_by_key(|e| e.occurred_at);
        Ok(found)
    }

    async fn append(&self, event: &HydrationEvent) -> AppResult<()> {
        self.events
            .entry(event.user_id)
            .or_default()
            .push(event.clone());
        Ok(())
    }
}
