//! Store traits for the reminder engine's persistence collaborators.
//!
//! Services hold these as `Arc<dyn Trait>` so the same code runs against
//! PostgreSQL in production and against the in-memory stores in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use hydrate_core::result::AppResult;
use hydrate_entity::analytics::AnalyticsEvent;
use hydrate_entity::hydration::{HydrationEvent, StreakState};
use hydrate_entity::notification::{
    MilestoneKey, MilestoneRecord, NotificationPreferences, PreferencesUpdate,
    ScheduledNotification,
};

/// Read access to the append-only hydration log.
#[async_trait]
pub trait EventStore: Send + Sync + std::fmt::Debug + 'static {
    /// Events for a user with `from <= occurred_at < to`, oldest first.
    async fn list_events(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<HydrationEvent>>;

    /// Append a new event.
    async fn append(&self, event: &HydrationEvent) -> AppResult<()>;
}

/// Per-user notification preferences.
#[async_trait]
pub trait PreferencesStore: Send + Sync + std::fmt::Debug + 'static {
    /// Preferences for a user, `None` if the user never configured reminders.
    async fn get(&self, user_id: Uuid) -> AppResult<Option<NotificationPreferences>>;

    /// Apply a partial update. Fails with `NotFound` for unknown users.
    async fn update(&self, user_id: Uuid, update: &PreferencesUpdate) -> AppResult<()>;

    /// Insert or fully replace a user's preferences.
    async fn upsert(&self, prefs: &NotificationPreferences) -> AppResult<()>;
}

/// Per-day milestone idempotency records.
#[async_trait]
pub trait MilestoneStore: Send + Sync + std::fmt::Debug + 'static {
    /// Whether a record exists for the key.
    async fn exists(&self, key: &MilestoneKey) -> AppResult<bool>;

    /// Atomically create the record. Returns `false` if it already existed.
    async fn create_if_absent(&self, record: &MilestoneRecord) -> AppResult<bool>;
}

/// The durable queue of pre-planned notifications.
#[async_trait]
pub trait NotificationQueue: Send + Sync + std::fmt::Debug + 'static {
    /// Add a pending record.
    async fn enqueue(&self, record: &ScheduledNotification) -> AppResult<()>;

    /// Up to `limit` records with `scheduled_for <= now` that are neither
    /// processed nor failed, earliest first.
    async fn fetch_due(&self, now: DateTime<Utc>, limit: usize)
    -> AppResult<Vec<ScheduledNotification>>;

    /// Conditionally mark a pending record processed. Returns `false` if
    /// the record was already terminal (claimed by another runner).
    async fn mark_processed(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<bool>;

    /// Conditionally mark a pending record failed. Returns `false` if the
    /// record was already terminal.
    async fn mark_failed(&self, id: Uuid, at: DateTime<Utc>, error: &str) -> AppResult<bool>;

    /// Look up a record by id.
    async fn get(&self, id: Uuid) -> AppResult<Option<ScheduledNotification>>;
}

/// Persisted streak counters.
#[async_trait]
pub trait StreakStore: Send + Sync + std::fmt::Debug + 'static {
    /// Stored streak for a user.
    async fn get(&self, user_id: Uuid) -> AppResult<Option<StreakState>>;

    /// Insert or replace the user's streak.
    async fn save(&self, state: &StreakState) -> AppResult<()>;
}

/// Fire-and-forget analytics.
#[async_trait]
pub trait AnalyticsSink: Send + Sync + std::fmt::Debug + 'static {
    /// Record one event.
    async fn record(&self, event: &AnalyticsEvent) -> AppResult<()>;
}
