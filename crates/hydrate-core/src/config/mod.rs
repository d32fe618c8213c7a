//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod delivery;
pub mod generation;
pub mod logging;
pub mod reminder;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::delivery::{PushConfig, SmsConfig};
pub use self::generation::GenerationConfig;
pub use self::logging::LoggingConfig;
pub use self::reminder::{ReminderConfig, TierIntervals};
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Reminder cadence and streak settings.
    #[serde(default)]
    pub reminder: ReminderConfig,
    /// External text generation settings.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Push transport settings.
    #[serde(default)]
    pub push: PushConfig,
    /// SMS transport settings.
    #[serde(default)]
    pub sms: SmsConfig,
    /// Scheduled batch runner settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database connection pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `HYDRATE__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("HYDRATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Check the invariants the rest of the application relies on.
    ///
    /// Missing transport credentials are not an error here: the transport
    /// is simply not constructed and the dispatcher reports the channel as
    /// unavailable.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.database.url.trim().is_empty() {
            return Err(AppError::configuration("database.url must not be empty"));
        }
        if self.worker.batch_size == 0 {
            return Err(AppError::configuration("worker.batch_size must be positive"));
        }
        if self.worker.concurrency == 0 {
            return Err(AppError::configuration("worker.concurrency must be positive"));
        }
        self.reminder.tiers.validate()?;
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> AppConfig {
        serde_json::from_value(serde_json::json!({
            "database": { "url": "postgres://localhost/hydrate" }
        }))
        .expect("minimal config should deserialize")
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = minimal();
        assert_eq!(config.worker.batch_size, 50);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.generation.timeout_seconds, 8);
        assert_eq!(config.reminder.tiers.moderate, vec![120, 180, 240, 360]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_database_url_rejected() {
        let mut config = minimal();
        config.database.url = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let mut config = minimal();
        config.worker.batch_size = 0;
        assert!(config.validate().is_err());
    }
}
