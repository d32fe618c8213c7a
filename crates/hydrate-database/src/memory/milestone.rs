//! In-memory milestone records.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use hydrate_core::result::AppResult;
use hydrate_entity::notification::{MilestoneKey, MilestoneRecord};

use crate::store::MilestoneStore;

/// Milestone records keyed by their full key.
#[derive(Debug, Default)]
pub struct MemoryMilestoneStore {
    records: DashMap<MilestoneKey, MilestoneRecord>,
}

impl MemoryMilestoneStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl MilestoneStore for MemoryMilestoneStore {
    async fn exists(&self, key: &MilestoneKey) -> AppResult<bool> {
        Ok(self.records.contains_key(key))
    }

    async fn create_if_absent(&self, record: &MilestoneRecord) -> AppResult<bool> {
        match self.records.entry(record.key) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(true)
            }
        }
    }
}
