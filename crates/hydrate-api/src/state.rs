//! Application state shared across all handlers.

use std::sync::Arc;

use hydrate_core::config::AppConfig;
use hydrate_database::DatabasePool;
use hydrate_service::ReminderOrchestrator;
use hydrate_worker::BatchRunner;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Interactive reminder flow
    pub reminders: Arc<ReminderOrchestrator>,
    /// Scheduled queue runner
    pub batch: Arc<BatchRunner>,
    /// PostgreSQL pool, absent when running on in-memory stores
    pub database: Option<DatabasePool>,
}
