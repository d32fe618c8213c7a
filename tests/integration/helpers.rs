//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use hydrate_core::config::{TierIntervals, WorkerConfig};
use hydrate_core::error::AppError;
use hydrate_core::result::AppResult;
use hydrate_core::traits::transport::{PushTransport, SmsTransport};
use hydrate_core::types::message::{PushMessage, SmsMessage};
use hydrate_database::memory::MemoryStores;
use hydrate_database::store::{EventStore, PreferencesStore};
use hydrate_entity::hydration::HydrationEvent;
use hydrate_entity::notification::{DaySplit, NotificationPreferences};
use hydrate_service::{
    AnalyticsRecorder, DeliveryDispatcher, FrequencyPolicy, MessageComposer, MilestoneTracker,
    ProgressTracker, ReminderOrchestrator, ScheduledDelivery,
};
use hydrate_worker::{BatchRunner, ReminderJobHandler};

/// Push transport that records messages or rejects them all.
#[derive(Debug, Default)]
pub struct RecordingPush {
    pub reject: bool,
    pub sent: Mutex<Vec<PushMessage>>,
}

#[async_trait]
impl PushTransport for RecordingPush {
    async fn send(&self, message: &PushMessage) -> AppResult<String> {
        if self.reject {
            return Err(AppError::external("registration token not registered"));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(message.clone());
        Ok(format!("projects/hydrate/messages/{}", sent.len()))
    }

    fn name(&self) -> &'static str {
        "recording-push"
    }
}

/// SMS transport that records messages.
#[derive(Debug, Default)]
pub struct RecordingSms {
    pub sent: Mutex<Vec<SmsMessage>>,
}

#[async_trait]
impl SmsTransport for RecordingSms {
    async fn send(&self, message: &SmsMessage) -> AppResult<String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(message.clone());
        Ok(format!("SM{:04}", sent.len()))
    }

    fn name(&self) -> &'static str {
        "recording-sms"
    }
}

/// Test engine context
pub struct TestEngine {
    pub stores: MemoryStores,
    pub push: Arc<RecordingPush>,
    pub sms: Arc<RecordingSms>,
    pub reminders: ReminderOrchestrator,
    pub delivery: ScheduledDelivery,
}

impl TestEngine {
    /// Engine with working push and SMS and no text generator.
    pub fn new() -> Self {
        Self::with_push(RecordingPush::default())
    }

    /// Engine with the given push transport.
    pub fn with_push(push: RecordingPush) -> Self {
        let stores = MemoryStores::new();
        let push = Arc::new(push);
        let sms = Arc::new(RecordingSms::default());
        let dispatcher = DeliveryDispatcher::new(
            Some(push.clone()),
            Some(sms.clone()),
            Some("+15550001111".to_string()),
        );
        let analytics = AnalyticsRecorder::new(stores.analytics.clone());

        let reminders = ReminderOrchestrator::new(
            stores.preferences.clone(),
            ProgressTracker::new(stores.events.clone(), stores.streaks.clone(), 90),
            FrequencyPolicy::new(TierIntervals::default()),
            MilestoneTracker::new(stores.milestones.clone()),
            MessageComposer::fallback_only(),
            dispatcher.clone(),
            analytics.clone(),
        );
        let delivery = ScheduledDelivery::new(
            stores.preferences.clone(),
            stores.streaks.clone(),
            MessageComposer::fallback_only(),
            dispatcher,
            analytics,
        );

        Self {
            stores,
            push,
            sms,
            reminders,
            delivery,
        }
    }

    /// A batch runner over this engine's queue.
    pub fn runner(&self, config: WorkerConfig) -> BatchRunner {
        BatchRunner::new(
            self.stores.queue.clone(),
            Arc::new(ReminderJobHandler::new(self.delivery.clone())),
            config,
        )
    }

    /// Store preferences for a new push-enabled user, adjusted by `edit`.
    pub async fn create_user(&self, edit: impl FnOnce(&mut NotificationPreferences)) -> Uuid {
        let mut prefs = NotificationPreferences::new(Uuid::new_v4());
        prefs.push_token = Some(format!("token-{}", prefs.user_id));
        edit(&mut prefs);
        self.stores.preferences.upsert(&prefs).await.unwrap();
        prefs.user_id
    }

    /// Append a hydration event.
    pub async fn log_water(&self, user_id: Uuid, at: DateTime<Utc>, amount_ml: i32) {
        self.stores
            .events
            .append(&HydrationEvent {
                id: Uuid::new_v4(),
                user_id,
                amount_ml,
                occurred_at: at,
            })
            .await
            .unwrap();
    }

    pub async fn prefs(&self, user_id: Uuid) -> NotificationPreferences {
        self.stores.preferences.get(user_id).await.unwrap().unwrap()
    }
}

/// 2026-10-14 at the given UTC time.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 14, hour, minute, 0).unwrap()
}

pub fn split(hour: u32, target_ml: i32, label: &str) -> DaySplit {
    DaySplit::new(NaiveTime::from_hms_opt(hour, 0, 0).unwrap(), target_ml, label)
}
