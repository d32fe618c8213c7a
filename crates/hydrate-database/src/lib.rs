//! # hydrate-database
//!
//! Store traits consumed by the reminder engine, with two families of
//! implementations: PostgreSQL repositories (sqlx) for production and
//! in-memory stores (dashmap) for tests and local runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{
    AnalyticsSink, EventStore, MilestoneStore, NotificationQueue, PreferencesStore, StreakStore,
};
