//! Integration tests for the interactive reminder flow.

use chrono::{Duration, NaiveDate};

use hydrate_database::store::StreakStore;
use hydrate_entity::analytics::AnalyticsEventType;
use hydrate_entity::notification::{
    DeliveryChannel, DeliveryMethod, LastNotified, NotificationCategory,
};
use hydrate_service::{ReminderRequest, SkipReason};

use crate::helpers::{RecordingPush, TestEngine, at, split};

#[tokio::test]
async fn test_reminders_follow_progress_band_interval() {
    let engine = TestEngine::new();
    let user_id = engine.create_user(|_| {}).await;
    engine.log_water(user_id, at(8, 0), 600).await;
    let request = ReminderRequest::new(user_id, NotificationCategory::Drink);

    let first = engine.reminders.send(&request, at(9, 0)).await.unwrap();
    assert!(first.success);
    assert_eq!(first.method, DeliveryChannel::Fcm);

    // 30% of goal selects the median moderate interval, 240 minutes.
    let early = engine.reminders.send(&request, at(12, 0)).await.unwrap();
    assert_eq!(early.skipped, Some(SkipReason::NotDue));

    let due = engine.reminders.send(&request, at(13, 0)).await.unwrap();
    assert!(due.success);

    assert_eq!(engine.push.sent.lock().unwrap().len(), 2);
    assert_eq!(engine.stores.analytics.count(AnalyticsEventType::ReminderSent), 2);
    assert_eq!(
        engine.prefs(user_id).await.last_notification_at,
        LastNotified::At(at(13, 0))
    );
}

#[tokio::test]
async fn test_streak_is_refreshed_from_history() {
    let engine = TestEngine::new();
    let user_id = engine.create_user(|_| {}).await;
    for days_ago in 1..=3 {
        engine
            .log_water(user_id, at(10, 0) - Duration::days(days_ago), 2100)
            .await;
    }
    engine.log_water(user_id, at(8, 0), 300).await;

    let result = engine
        .reminders
        .send(&ReminderRequest::new(user_id, NotificationCategory::Glass), at(9, 0))
        .await
        .unwrap();
    assert!(result.success);

    let streak = engine.stores.streaks.get(user_id).await.unwrap().unwrap();
    assert_eq!(streak.current_streak, 3);
    assert_eq!(streak.longest_streak, 3);
    assert_eq!(
        streak.last_qualifying_date,
        NaiveDate::from_ymd_opt(2026, 10, 13)
    );
}

#[tokio::test]
async fn test_push_failure_falls_back_to_sms() {
    let engine = TestEngine::with_push(RecordingPush {
        reject: true,
        ..RecordingPush::default()
    });
    let user_id = engine
        .create_user(|p| {
            p.sms_enabled = true;
            p.phone_number = Some("+15557654321".to_string());
        })
        .await;

    let result = engine
        .reminders
        .send(&ReminderRequest::new(user_id, NotificationCategory::Sip), at(9, 0))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.method, DeliveryChannel::Sms);
    assert!(result.error.unwrap().starts_with("fcm: "));

    let sms = engine.sms.sent.lock().unwrap();
    assert_eq!(sms.len(), 1);
    assert_eq!(sms[0].to, "+15557654321");
    assert_eq!(sms[0].from, "+15550001111");
    assert!(sms[0].body.chars().count() <= 160);
}

#[tokio::test]
async fn test_both_method_sends_on_each_channel() {
    let engine = TestEngine::new();
    let user_id = engine
        .create_user(|p| {
            p.sms_enabled = true;
            p.phone_number = Some("+15557654321".to_string());
        })
        .await;

    let mut request = ReminderRequest::new(user_id, NotificationCategory::Walk);
    request.method_override = Some(DeliveryMethod::Both);
    let result = engine.reminders.send(&request, at(9, 0)).await.unwrap();

    assert_eq!(result.method, DeliveryChannel::Both);
    assert!(result.error.is_none());
    assert_eq!(engine.push.sent.lock().unwrap().len(), 1);
    assert_eq!(engine.sms.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_milestones_fire_once_per_split_per_day() {
    let engine = TestEngine::new();
    let user_id = engine
        .create_user(|p| p.day_splits = vec![split(10, 800, "Morning"), split(14, 1500, "Lunch")])
        .await;
    engine.log_water(user_id, at(9, 30), 1000).await;

    let mut request = ReminderRequest::new(user_id, NotificationCategory::Milestone);
    request.test_mode = true;

    let morning = engine.reminders.send(&request, at(11, 0)).await.unwrap();
    assert!(morning.success);

    let repeat = engine.reminders.send(&request, at(11, 30)).await.unwrap();
    assert_eq!(repeat.skipped, Some(SkipReason::NoMilestone));

    engine.log_water(user_id, at(13, 0), 600).await;
    let lunch = engine.reminders.send(&request, at(14, 5)).await.unwrap();
    assert!(lunch.success);

    let titles: Vec<String> = engine
        .push
        .sent
        .lock()
        .unwrap()
        .iter()
        .map(|m| m.title.clone())
        .collect();
    assert_eq!(titles, ["Milestone reached: Morning", "Milestone reached: Lunch"]);
    assert_eq!(engine.stores.milestones.len(), 2);
    assert_eq!(
        engine.prefs(user_id).await.last_notification_at,
        LastNotified::Never
    );
}

#[tokio::test]
async fn test_local_day_follows_user_offset() {
    let engine = TestEngine::new();
    // UTC+10: 14:30 UTC on the 14th is 00:30 on the 15th locally, so the
    // 1900 ml logged at 23:00 local belongs to the previous day.
    let user_id = engine
        .create_user(|p| {
            p.utc_offset_minutes = 600;
            p.last_notification_at = LastNotified::At(at(12, 0));
        })
        .await;
    engine.log_water(user_id, at(13, 0), 1900).await;

    // 150 minutes clears the 0% interval (120) but not the 95% one (360).
    let result = engine
        .reminders
        .send(&ReminderRequest::new(user_id, NotificationCategory::Drink), at(14, 30))
        .await
        .unwrap();
    assert!(result.success, "{result:?}");

    let utc_user = engine
        .create_user(|p| p.last_notification_at = LastNotified::At(at(12, 0)))
        .await;
    engine.log_water(utc_user, at(13, 0), 1900).await;
    let result = engine
        .reminders
        .send(&ReminderRequest::new(utc_user, NotificationCategory::Drink), at(14, 30))
        .await
        .unwrap();
    assert_eq!(result.skipped, Some(SkipReason::NotDue));
}
