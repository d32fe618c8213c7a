//! Best-effort analytics recording.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use hydrate_database::store::AnalyticsSink;
use hydrate_entity::analytics::{AnalyticsEvent, AnalyticsEventType};

/// Records analytics events without ever failing the caller.
#[derive(Debug, Clone)]
pub struct AnalyticsRecorder {
    sink: Arc<dyn AnalyticsSink>,
}

impl AnalyticsRecorder {
    /// Creates a new recorder.
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self { sink }
    }

    /// Record an event. Sink failures are logged and dropped.
    pub async fn record(
        &self,
        user_id: Uuid,
        event_type: AnalyticsEventType,
        payload: serde_json::Value,
        at: DateTime<Utc>,
    ) {
        let event = AnalyticsEvent::new(user_id, event_type, payload, at);
        if let Err(e) = self.sink.record(&event).await {
            warn!(
                user_id = %user_id,
                event_type = %event_type,
                error = %e,
                "Failed to record analytics event"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrate_database::memory::MemoryAnalyticsSink;

    use crate::test_support::FailingAnalyticsSink;

    #[tokio::test]
    async fn test_records_to_sink() {
        let sink = Arc::new(MemoryAnalyticsSink::new());
        let recorder = AnalyticsRecorder::new(sink.clone());
        recorder
            .record(Uuid::new_v4(), AnalyticsEventType::ReminderSent, serde_json::json!({}), Utc::now())
            .await;
        assert_eq!(sink.count(AnalyticsEventType::ReminderSent), 1);
    }

    #[tokio::test]
    async fn test_sink_failure_swallowed() {
        let recorder = AnalyticsRecorder::new(Arc::new(FailingAnalyticsSink));
        recorder
            .record(Uuid::new_v4(), AnalyticsEventType::MilestoneReached, serde_json::json!({}), Utc::now())
            .await;
    }
}
