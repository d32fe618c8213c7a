//! In-memory preference store.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use hydrate_core::error::AppError;
use hydrate_core::result::AppResult;
use hydrate_entity::notification::{NotificationPreferences, PreferencesUpdate};

use crate::store::PreferencesStore;

/// Preferences keyed by user.
#[derive(Debug, Default)]
pub struct MemoryPreferencesStore {
    prefs: DashMap<Uuid, NotificationPreferences>,
}

impl MemoryPreferencesStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferencesStore for MemoryPreferencesStore {
    async fn get(&self, user_id: Uuid) -> AppResult<Option<NotificationPreferences>> {
        Ok(self.prefs.get(&user_id).map(|p| p.clone()))
    }

    async fn update(&self, user_id: Uuid, update: &PreferencesUpdate) -> AppResult<()> {
        let mut prefs = self.prefs.get_mut(&user_id).ok_or_else(|| {
            AppError::not_found(format!("No notification preferences for user {user_id}"))
        })?;
        update.apply(&mut prefs);
        Ok(())
    }

    async fn upsert(&self, prefs: &NotificationPreferences) -> AppResult<()> {
        self.prefs.insert(prefs.user_id, prefs.clone());
        Ok(())
    }
}
