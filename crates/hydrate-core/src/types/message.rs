//! Outbound message payloads for push, SMS, and text generation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A push notification addressed to a single device token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    /// Device registration token.
    pub token: String,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// String key/value data delivered alongside the notification.
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

/// A text message addressed to a single phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsMessage {
    /// Recipient number in E.164 format.
    pub to: String,
    /// Sender number in E.164 format.
    pub from: String,
    /// Message body.
    pub body: String,
}

/// A request to the external text generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Fully rendered prompt.
    pub prompt: String,
    /// Upper bound on the generated text, in characters.
    pub max_output_length: usize,
    /// Sampling temperature.
    pub temperature: f32,
}
