//! Firebase Cloud Messaging (HTTP v1) push transport.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use hydrate_core::config::PushConfig;
use hydrate_core::error::AppError;
use hydrate_core::result::AppResult;
use hydrate_core::traits::transport::PushTransport;
use hydrate_core::types::message::PushMessage;

use crate::error::TransportError;
use crate::{build_client, status_error};

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    message: FcmMessage<'a>,
}

#[derive(Debug, Serialize)]
struct FcmMessage<'a> {
    token: &'a str,
    notification: FcmNotification<'a>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    data: &'a BTreeMap<String, String>,
    android: AndroidConfig,
}

#[derive(Debug, Serialize)]
struct FcmNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct AndroidConfig {
    priority: &'static str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    name: Option<String>,
}

/// Push transport over the FCM v1 `messages:send` endpoint.
#[derive(Debug, Clone)]
pub struct FcmPushTransport {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl FcmPushTransport {
    /// Build the transport, or `None` when push credentials are absent.
    pub fn from_config(config: &PushConfig) -> AppResult<Option<Self>> {
        if !config.is_configured() {
            return Ok(None);
        }
        Ok(Some(Self {
            client: build_client(config.timeout_seconds)?,
            endpoint: format!(
                "{}/v1/projects/{}/messages:send",
                config.base_url.trim_end_matches('/'),
                config.project_id
            ),
            access_token: config.access_token.clone(),
        }))
    }

    fn request_body(message: &PushMessage) -> SendRequest<'_> {
        SendRequest {
            message: FcmMessage {
                token: &message.token,
                notification: FcmNotification {
                    title: &message.title,
                    body: &message.body,
                },
                data: &message.data,
                android: AndroidConfig { priority: "high" },
            },
        }
    }

    async fn try_send(&self, message: &PushMessage) -> Result<String, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&Self::request_body(message))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let parsed: SendResponse = response.json().await?;
        parsed
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| TransportError::InvalidResponse("missing message name".to_string()))
    }
}

#[async_trait]
impl PushTransport for FcmPushTransport {
    async fn send(&self, message: &PushMessage) -> AppResult<String> {
        let id = self.try_send(message).await.map_err(AppError::from)?;
        debug!(message_id = %id, "FCM accepted push");
        Ok(id)
    }

    fn name(&self) -> &'static str {
        "fcm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> PushConfig {
        PushConfig {
            project_id: "hydrate-prod".to_string(),
            access_token: "ya29.token".to_string(),
            base_url: "https://fcm.example.test/".to_string(),
            ..PushConfig::default()
        }
    }

    #[test]
    fn test_unconfigured_builds_nothing() {
        assert!(FcmPushTransport::from_config(&PushConfig::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_endpoint_uses_project() {
        let transport = FcmPushTransport::from_config(&configured()).unwrap().unwrap();
        assert_eq!(
            transport.endpoint,
            "https://fcm.example.test/v1/projects/hydrate-prod/messages:send"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let mut data = BTreeMap::new();
        data.insert("category".to_string(), "sip".to_string());
        let message = PushMessage {
            token: "device-1".to_string(),
            title: "Time for a sip".to_string(),
            body: "Grab your bottle".to_string(),
            data,
        };

        let value = serde_json::to_value(FcmPushTransport::request_body(&message)).unwrap();
        assert_eq!(value["message"]["token"], "device-1");
        assert_eq!(value["message"]["notification"]["title"], "Time for a sip");
        assert_eq!(value["message"]["data"]["category"], "sip");
        assert_eq!(value["message"]["android"]["priority"], "high");
    }

    #[test]
    fn test_empty_data_omitted() {
        let message = PushMessage {
            token: "t".to_string(),
            title: "a".to_string(),
            body: "b".to_string(),
            data: BTreeMap::new(),
        };
        let value = serde_json::to_value(FcmPushTransport::request_body(&message)).unwrap();
        assert!(value["message"].get("data").is_none());
    }
}
