//! In-memory store implementations backed by `DashMap`.
//!
//! Used by tests across the workspace. Each store honours the same
//! atomicity the PostgreSQL repositories get from their constraints.

pub mod analytics;
pub mod event;
pub mod milestone;
pub mod preference;
pub mod scheduled;
pub mod streak;

use std::sync::Arc;

pub use analytics::MemoryAnalyticsSink;
pub use event::MemoryEventStore;
pub use milestone::MemoryMilestoneStore;
pub use preference::MemoryPreferencesStore;
pub use scheduled::MemoryNotificationQueue;
pub use streak::MemoryStreakStore;

/// One of every in-memory store, shared behind `Arc`s.
#[derive(Debug, Clone, Default)]
pub struct MemoryStores {
    /// Hydration events.
    pub events: Arc<MemoryEventStore>,
    /// Notification preferences.
    pub preferences: Arc<MemoryPreferencesStore>,
    /// Milestone records.
    pub milestones: Arc<MemoryMilestoneStore>,
    /// Scheduled notification queue.
    pub queue: Arc<MemoryNotificationQueue>,
    /// Streak counters.
    pub streaks: Arc<MemoryStreakStore>,
    /// Recorded analytics.
    pub analytics: Arc<MemoryAnalyticsSink>,
}

impl MemoryStores {
    /// Fresh, empty stores.
    pub fn new() -> Self {
        Self::default()
    }
}
