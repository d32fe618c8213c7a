//! Route definitions for the Hydrate HTTP API.
//!
//! All routes are mounted under `/api`.

use std::time::Duration;

use axum::http::{HeaderValue, Method, StatusCode};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use hydrate_core::config::ServerConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(reminder_routes())
        .merge(worker_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .nest("/api", api_routes)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Interactive reminder endpoints
fn reminder_routes() -> Router<AppState> {
    Router::new().route("/reminders/send", post(handlers::reminder::send_reminder))
}

/// Queue maintenance endpoints
fn worker_routes() -> Router<AppState> {
    Router::new().route("/worker/drain", post(handlers::worker::drain))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Builds a CORS tower layer from configuration.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if config.allowed_origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;
    use uuid::Uuid;

    use hydrate_core::config::{AppConfig, TierIntervals, WorkerConfig};
    use hydrate_core::result::AppResult;
    use hydrate_core::traits::transport::PushTransport;
    use hydrate_core::types::message::PushMessage;
    use hydrate_database::memory::MemoryStores;
    use hydrate_database::store::PreferencesStore;
    use hydrate_entity::notification::NotificationPreferences;
    use hydrate_service::{
        AnalyticsRecorder, DeliveryDispatcher, FrequencyPolicy, MessageComposer,
        MilestoneTracker, ProgressTracker, ReminderOrchestrator, ScheduledDelivery,
    };
    use hydrate_worker::{BatchRunner, ReminderJobHandler};

    #[derive(Debug)]
    struct OkPush;

    #[async_trait]
    impl PushTransport for OkPush {
        async fn send(&self, _message: &PushMessage) -> AppResult<String> {
            Ok("msg-1".to_string())
        }

        fn name(&self) -> &'static str {
            "ok"
        }
    }

    fn app(stores: &MemoryStores) -> Router {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "database": { "url": "postgres://localhost/hydrate_test" }
        }))
        .unwrap();
        let dispatcher = DeliveryDispatcher::new(Some(Arc::new(OkPush)), None, None);
        let analytics = AnalyticsRecorder::new(stores.analytics.clone());

        let reminders = ReminderOrchestrator::new(
            stores.preferences.clone(),
            ProgressTracker::new(stores.events.clone(), stores.streaks.clone(), 30),
            FrequencyPolicy::new(TierIntervals::default()),
            MilestoneTracker::new(stores.milestones.clone()),
            MessageComposer::fallback_only(),
            dispatcher.clone(),
            analytics.clone(),
        );
        let handler = ReminderJobHandler::new(ScheduledDelivery::new(
            stores.preferences.clone(),
            stores.streaks.clone(),
            MessageComposer::fallback_only(),
            dispatcher,
            analytics,
        ));
        let batch = BatchRunner::new(stores.queue.clone(), Arc::new(handler), WorkerConfig::default());

        build_router(AppState {
            config: Arc::new(config),
            reminders: Arc::new(reminders),
            batch: Arc::new(batch),
            database: None,
        })
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let stores = MemoryStores::new();
        let response = app(&stores)
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["database"], "memory");
    }

    #[tokio::test]
    async fn test_send_reminder() {
        let stores = MemoryStores::new();
        let mut prefs = NotificationPreferences::new(Uuid::new_v4());
        prefs.push_token = Some("device".to_string());
        stores.preferences.upsert(&prefs).await.unwrap();

        let response = app(&stores)
            .oneshot(post_json(
                "/api/reminders/send",
                serde_json::json!({ "user_id": prefs.user_id, "category": "sip" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["success"], true);
        assert_eq!(body["data"]["method"], "fcm");
    }

    #[tokio::test]
    async fn test_unknown_user_is_404() {
        let stores = MemoryStores::new();
        let response = app(&stores)
            .oneshot(post_json(
                "/api/reminders/send",
                serde_json::json!({ "user_id": Uuid::new_v4(), "category": "drink" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_nil_user_is_400() {
        let stores = MemoryStores::new();
        let response = app(&stores)
            .oneshot(post_json(
                "/api/reminders/send",
                serde_json::json!({ "user_id": Uuid::nil(), "category": "drink" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_drain_empty_queue() {
        let stores = MemoryStores::new();
        let response = app(&stores)
            .oneshot(post_json("/api/worker/drain", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["fetched"], 0);
    }
}
