//! Connection pool shared by the PostgreSQL reminder stores.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use hydrate_core::config::DatabaseConfig;
use hydrate_core::error::{AppError, ErrorKind};
use hydrate_core::result::AppResult;

/// Reported to the server as `application_name`.
const APPLICATION_NAME: &str = "hydrate-server";

/// Pool handed to every repository.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool described by `database.*` settings.
    ///
    /// A malformed URL is a configuration error and never reaches the network.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = parse_options(&config.url)?;
        info!(
            target_db = %describe_target(&options),
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Opening reminder store pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Reminder store unreachable: {e}"),
                    e,
                )
            })?;

        info!("Reminder store pool ready");
        Ok(Self { pool })
    }

    /// The sqlx pool, for building repositories.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Whether the server answers a trivial query. Backs `GET /api/health`.
    pub async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Reminder store health check failed", e))
    }

    /// Wait for in-flight queries and close every connection.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Reminder store pool closed");
    }
}

fn parse_options(url: &str) -> AppResult<PgConnectOptions> {
    url.parse::<PgConnectOptions>()
        .map(|options| options.application_name(APPLICATION_NAME))
        .map_err(|e| AppError::with_source(ErrorKind::Configuration, "Invalid database.url", e))
}

/// `host:port/database`, without credentials.
fn describe_target(options: &PgConnectOptions) -> String {
    format!(
        "{}:{}/{}",
        options.get_host(),
        options.get_port(),
        options.get_database().unwrap_or("-")
    )
}
