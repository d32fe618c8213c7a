//! Sends scheduled reminders through the delivery service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use hydrate_entity::notification::ScheduledNotification;
use hydrate_service::ScheduledDelivery;
use hydrate_service::delivery::NO_CHANNEL;

use crate::executor::{DeliveryJobError, NotificationHandler};

/// Handles due `ScheduledNotification` records.
#[derive(Debug, Clone)]
pub struct ReminderJobHandler {
    delivery: ScheduledDelivery,
}

impl ReminderJobHandler {
    /// Create a new reminder job handler
    pub fn new(delivery: ScheduledDelivery) -> Self {
        Self { delivery }
    }
}

#[async_trait]
impl NotificationHandler for ReminderJobHandler {
    fn name(&self) -> &str {
        "scheduled_reminder"
    }

    async fn handle(
        &self,
        record: &ScheduledNotification,
        now: DateTime<Utc>,
    ) -> Result<Option<Value>, DeliveryJobError> {
        let outcome = self.delivery.deliver(record, now).await?;

        if !outcome.success {
            return Err(DeliveryJobError::Undeliverable(
                outcome.error.unwrap_or_else(|| NO_CHANNEL.to_string()),
            ));
        }

        Ok(Some(serde_json::json!({
            "channel": outcome.channel_attempted,
            "push_message_id": outcome.push_message_id,
            "sms_message_id": outcome.sms_message_id,
        })))
    }
}
