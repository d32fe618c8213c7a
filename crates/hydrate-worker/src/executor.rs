//! Handler seam between the batch runner and delivery.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use hydrate_core::error::AppError;
use hydrate_entity::notification::ScheduledNotification;

/// Processes one queued record.
#[async_trait]
pub trait NotificationHandler: Send + Sync + std::fmt::Debug + 'static {
    /// Handler name used in logs.
    fn name(&self) -> &str;

    /// Deliver the record. `Ok` marks it processed, `Err` marks it failed.
    async fn handle(
        &self,
        record: &ScheduledNotification,
        now: DateTime<Utc>,
    ) -> Result<Option<Value>, DeliveryJobError>;
}

/// Error from handling a record. Every variant is terminal for the record.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryJobError {
    /// Dispatch completed but no channel delivered.
    #[error("Delivery failed: {0}")]
    Undeliverable(String),

    /// The record could not be processed at all.
    #[error("{0}")]
    Internal(#[from] AppError),
}
