//! Integration tests for the scheduled batch runner.

use chrono::Duration;
use uuid::Uuid;

use hydrate_core::config::WorkerConfig;
use hydrate_database::store::NotificationQueue;
use hydrate_entity::analytics::AnalyticsEventType;
use hydrate_entity::notification::{
    LastNotified, NotificationCategory, ScheduledNotification, Tone,
};

use crate::helpers::{TestEngine, at};

fn scheduled(user_id: Uuid, minutes_early: i64) -> ScheduledNotification {
    ScheduledNotification::new(
        user_id,
        NotificationCategory::Glass,
        at(12, 0) - Duration::minutes(minutes_early),
        800,
        2000,
        Tone::Motivational,
    )
}

#[tokio::test]
async fn test_bad_record_does_not_block_batch() {
    let engine = TestEngine::new();
    let first = engine.create_user(|_| {}).await;
    let third = engine.create_user(|_| {}).await;

    let records = [
        scheduled(first, 30),
        scheduled(Uuid::new_v4(), 20),
        scheduled(third, 10),
    ];
    for record in &records {
        engine.stores.queue.enqueue(record).await.unwrap();
    }

    let report = engine
        .runner(WorkerConfig::default())
        .run_once(at(12, 0))
        .await
        .unwrap();

    assert_eq!(report.fetched, 3);
    assert_eq!(report.processed, 2);
    assert_eq!(report.failed, 1);

    let orphan = engine.stores.queue.get(records[1].id).await.unwrap().unwrap();
    assert!(orphan.failed && !orphan.processed);
    assert!(orphan.error.is_some());
    for id in [records[0].id, records[2].id] {
        let record = engine.stores.queue.get(id).await.unwrap().unwrap();
        assert!(record.processed && !record.failed);
    }

    assert_eq!(
        engine
            .stores
            .analytics
            .count(AnalyticsEventType::ScheduledReminderSent),
        2
    );
    assert_eq!(
        engine.prefs(first).await.last_notification_at,
        LastNotified::At(at(12, 0))
    );
}

#[tokio::test]
async fn test_second_drain_finds_nothing() {
    let engine = TestEngine::new();
    let user_id = engine.create_user(|_| {}).await;
    engine.stores.queue.enqueue(&scheduled(user_id, 5)).await.unwrap();
    let runner = engine.runner(WorkerConfig::default());

    assert_eq!(runner.run_once(at(12, 0)).await.unwrap().processed, 1);
    assert_eq!(runner.run_once(at(12, 5)).await.unwrap().fetched, 0);
    assert_eq!(engine.push.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_competing_runners_finish_each_record_once() {
    let engine = TestEngine::new();
    let mut ids = Vec::new();
    for i in 0..6 {
        let user_id = engine.create_user(|_| {}).await;
        let record = scheduled(user_id, 30 - i);
        engine.stores.queue.enqueue(&record).await.unwrap();
        ids.push(record.id);
    }

    let a = engine.runner(WorkerConfig::default());
    let b = engine.runner(WorkerConfig::default());
    let (ra, rb) = tokio::join!(a.run_once(at(12, 0)), b.run_once(at(12, 0)));
    let (ra, rb) = (ra.unwrap(), rb.unwrap());

    assert_eq!(ra.processed + rb.processed, 6);
    assert_eq!(ra.failed + rb.failed, 0);
    for id in ids {
        let record = engine.stores.queue.get(id).await.unwrap().unwrap();
        assert!(record.processed);
    }
}

#[tokio::test]
async fn test_sms_only_user_receives_scheduled_sms() {
    let engine = TestEngine::new();
    let user_id = engine
        .create_user(|p| {
            p.push_token = None;
            p.sms_enabled = true;
            p.phone_number = Some("+15553334444".to_string());
        })
        .await;
    engine.stores.queue.enqueue(&scheduled(user_id, 1)).await.unwrap();

    let report = engine
        .runner(WorkerConfig::default())
        .run_once(at(12, 0))
        .await
        .unwrap();

    assert_eq!(report.processed, 1);
    let sms = engine.sms.sent.lock().unwrap();
    assert_eq!(sms.len(), 1);
    assert_eq!(sms[0].to, "+15553334444");
}
