//! Schema migrations for the reminder stores.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use hydrate_core::error::{AppError, ErrorKind};
use hydrate_core::result::AppResult;

/// Embedded copy of the workspace `migrations/` directory.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the events, streaks, preferences, milestones, queue and analytics
/// tables up to date.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    let latest = MIGRATOR.iter().map(|m| m.version).max().unwrap_or_default();
    info!(
        known = MIGRATOR.iter().count(),
        latest_version = latest,
        "Applying reminder schema migrations"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Reminder schema migration failed: {e}"),
            e,
        )
    })?;

    info!(latest_version = latest, "Reminder schema up to date");
    Ok(())
}
