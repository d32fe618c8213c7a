//! Push/SMS dispatch with fallback and per-channel error capture.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use hydrate_core::traits::transport::{PushTransport, SmsTransport};
use hydrate_core::types::message::{PushMessage, SmsMessage};
use hydrate_entity::notification::{
    DeliveryChannel, DeliveryMethod, DeliveryOutcome, NotificationCategory,
    NotificationPreferences,
};

use crate::message::MessageChannel;

/// Error text when no channel can be used at all.
pub const NO_CHANNEL: &str = "no delivery channel available";

/// A composed reminder ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    /// Notification title (push only).
    pub title: String,
    /// Message body.
    pub body: String,
    /// Category, forwarded in the push data payload.
    pub category: NotificationCategory,
    /// Whether the client should celebrate with confetti.
    pub confetti: bool,
}

/// Sends reminders over push and SMS.
///
/// Never fails: every problem, including a missing transport or contact
/// detail, is reported in the returned [`DeliveryOutcome`].
#[derive(Debug, Clone, Default)]
pub struct DeliveryDispatcher {
    push: Option<Arc<dyn PushTransport>>,
    sms: Option<Arc<dyn SmsTransport>>,
    sms_from: Option<String>,
}

impl DeliveryDispatcher {
    /// Creates a dispatcher. Absent transports make that channel
    /// unavailable.
    pub fn new(
        push: Option<Arc<dyn PushTransport>>,
        sms: Option<Arc<dyn SmsTransport>>,
        sms_from: Option<String>,
    ) -> Self {
        Self {
            push,
            sms,
            sms_from: sms_from.filter(|n| !n.trim().is_empty()),
        }
    }

    /// Whether SMS can be sent to this user.
    pub fn sms_available(&self, prefs: &NotificationPreferences) -> bool {
        self.sms.is_some() && self.sms_from.is_some() && prefs.sms_number().is_some()
    }

    /// The channel whose budget a message to this user must respect.
    /// SMS is the tighter budget and applies whenever SMS may be used.
    pub fn budget_channel(&self, prefs: &NotificationPreferences) -> MessageChannel {
        if self.sms_available(prefs) {
            MessageChannel::Sms
        } else {
            MessageChannel::Push
        }
    }

    /// Resolve `auto` to a concrete method. `None` when nothing is usable.
    pub fn resolve(
        &self,
        requested: DeliveryMethod,
        prefs: &NotificationPreferences,
    ) -> Option<DeliveryMethod> {
        match requested {
            DeliveryMethod::Auto => {
                if prefs.push_token().is_some() {
                    Some(DeliveryMethod::Fcm)
                } else if self.sms_available(prefs) {
                    Some(DeliveryMethod::Sms)
                } else {
                    None
                }
            }
            explicit => Some(explicit),
        }
    }

    /// Send the message according to `requested` and the user's settings.
    pub async fn send(
        &self,
        user_id: Uuid,
        message: &OutboundMessage,
        requested: DeliveryMethod,
        prefs: &NotificationPreferences,
    ) -> DeliveryOutcome {
        let Some(method) = self.resolve(requested, prefs) else {
            info!(user_id = %user_id, "No delivery channel available");
            return DeliveryOutcome::none(NO_CHANNEL);
        };

        let mut errors: Vec<String> = Vec::new();
        let mut push_message_id = None;
        let mut sms_message_id = None;

        if matches!(method, DeliveryMethod::Fcm | DeliveryMethod::Both) {
            match self.try_push(user_id, message, prefs).await {
                Ok(id) => push_message_id = Some(id),
                Err(e) => {
                    warn!(user_id = %user_id, channel = "fcm", error = %e, "Push delivery failed");
                    errors.push(format!("fcm: {e}"));
                }
            }
        }

        let fcm_ok = push_message_id.is_some();
        let attempt_sms = matches!(method, DeliveryMethod::Sms | DeliveryMethod::Both)
            || (method == DeliveryMethod::Fcm && !fcm_ok);

        if attempt_sms {
            match self.try_sms(message, prefs).await {
                Ok(id) => sms_message_id = Some(id),
                Err(e) => {
                    warn!(user_id = %user_id, channel = "sms", error = %e, "SMS delivery failed");
                    errors.push(format!("sms: {e}"));
                }
            }
        }

        let sms_ok = sms_message_id.is_some();
        let channel = DeliveryChannel::from_results(fcm_ok, sms_ok);
        let success = fcm_ok || sms_ok;

        if success {
            info!(user_id = %user_id, channel = %channel, "Reminder delivered");
        }

        DeliveryOutcome {
            channel_attempted: channel,
            success,
            error: (!errors.is_empty()).then(|| errors.join("; ")),
            push_message_id,
            sms_message_id,
        }
    }

    async fn try_push(
        &self,
        user_id: Uuid,
        message: &OutboundMessage,
        prefs: &NotificationPreferences,
    ) -> Result<String, String> {
        let token = prefs
            .push_token()
            .ok_or_else(|| "push disabled or no device token".to_string())?;
        let transport = self
            .push
            .as_ref()
            .ok_or_else(|| "push transport not configured".to_string())?;

        let mut data = BTreeMap::new();
        data.insert("category".to_string(), message.category.as_str().to_string());
        data.insert("user_id".to_string(), user_id.to_string());
        if message.confetti {
            data.insert("confetti".to_string(), "true".to_string());
        }

        let push = PushMessage {
            token: token.to_string(),
            title: message.title.clone(),
            body: message.body.clone(),
            data,
        };
        transport.send(&push).await.map_err(|e| e.to_string())
    }

    async fn try_sms(
        &self,
        message: &OutboundMessage,
        prefs: &NotificationPreferences,
    ) -> Result<String, String> {
        let to = prefs
            .sms_number()
            .ok_or_else(|| "sms disabled or no phone number".to_string())?;
        let transport = self
            .sms
            .as_ref()
            .ok_or_else(|| "sms transport not configured".to_string())?;
        let from = self
            .sms_from
            .as_deref()
            .ok_or_else(|| "sms sender number not configured".to_string())?;

        let sms = SmsMessage {
            to: to.to_string(),
            from: from.to_string(),
            body: message.body.clone(),
        };
        transport.send(&sms).await.map_err(|e| e.to_string())
    }
}
