//! Fakes shared by the unit tests in this crate.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use hydrate_core::error::AppError;
use hydrate_core::result::AppResult;
use hydrate_core::traits::transport::{PushTransport, SmsTransport, TextGenerator};
use hydrate_core::types::message::{GenerationRequest, PushMessage, SmsMessage};
use hydrate_database::store::{AnalyticsSink, MilestoneStore};
use hydrate_entity::analytics::AnalyticsEvent;
use hydrate_entity::notification::{MilestoneKey, MilestoneRecord};

#[derive(Debug, Clone)]
pub enum GeneratorBehavior {
    Reply(String),
    Fail,
    Hang,
}

#[derive(Debug)]
pub struct FakeGenerator {
    behavior: GeneratorBehavior,
    calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn new(behavior: GeneratorBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            GeneratorBehavior::Reply(text) => Ok(text.clone()),
            GeneratorBehavior::Fail => Err(AppError::external("generator unavailable")),
            GeneratorBehavior::Hang => {
                tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
                Ok("too late".to_string())
            }
        }
    }
}

#[derive(Debug)]
pub struct FakePush {
    fail: bool,
    sent: Mutex<Vec<PushMessage>>,
}

impl FakePush {
    pub fn ok() -> Self {
        Self {
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushTransport for FakePush {
    async fn send(&self, message: &PushMessage) -> AppResult<String> {
        if self.fail {
            return Err(AppError::external("push provider rejected token"));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(message.clone());
        Ok(format!("push-{}", sent.len()))
    }

    fn name(&self) -> &'static str {
        "fake-push"
    }
}

#[derive(Debug)]
pub struct FakeSms {
    fail: bool,
    sent: Mutex<Vec<SmsMessage>>,
}

impl FakeSms {
    pub fn ok() -> Self {
        Self {
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<SmsMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsTransport for FakeSms {
    async fn send(&self, message: &SmsMessage) -> AppResult<String> {
        if self.fail {
            return Err(AppError::external("sms provider unavailable"));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(message.clone());
        Ok(format!("SM{}", sent.len()))
    }

    fn name(&self) -> &'static str {
        "fake-sms"
    }
}

/// Reports nothing recorded and fails every create.
#[derive(Debug)]
pub struct FailingMilestoneStore;

#[async_trait]
impl MilestoneStore for FailingMilestoneStore {
    async fn exists(&self, _key: &MilestoneKey) -> AppResult<bool> {
        Ok(false)
    }

    async fn create_if_absent(&self, _record: &MilestoneRecord) -> AppResult<bool> {
        Err(AppError::database("connection reset"))
    }
}

#[derive(Debug)]
pub struct FailingAnalyticsSink;

#[async_trait]
impl AnalyticsSink for FailingAnalyticsSink {
    async fn record(&self, _event: &AnalyticsEvent) -> AppResult<()> {
        Err(AppError::database("analytics table missing"))
    }
}
