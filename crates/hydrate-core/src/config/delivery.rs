//! Push and SMS transport configuration.

use serde::{Deserialize, Serialize};

/// Firebase Cloud Messaging (HTTP v1) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// Whether the push transport should be constructed at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Firebase project identifier.
    #[serde(default)]
    pub project_id: String,
    /// OAuth2 access token for the messaging scope, supplied out-of-band.
    #[serde(default)]
    pub access_token: String,
    /// API base URL (overridable for tests and emulators).
    #[serde(default = "default_fcm_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl PushConfig {
    /// Whether enough credentials are present to build a transport.
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.project_id.is_empty() && !self.access_token.is_empty()
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            project_id: String::new(),
            access_token: String::new(),
            base_url: default_fcm_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Twilio SMS settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsConfig {
    /// Whether the SMS transport should be constructed at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Twilio account SID.
    #[serde(default)]
    pub account_sid: String,
    /// Twilio auth token.
    #[serde(default)]
    pub auth_token: String,
    /// Sender phone number in E.164 format.
    #[serde(default)]
    pub from_number: String,
    /// API base URL (overridable for tests).
    #[serde(default = "default_twilio_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl SmsConfig {
    /// Whether enough credentials are present to build a transport.
    pub fn is_configured(&self) -> bool {
        self.enabled
            && !self.account_sid.is_empty()
            && !self.auth_token.is_empty()
            && !self.from_number.is_empty()
    }
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            base_url: default_twilio_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_fcm_base_url() -> String {
    "https://fcm.googleapis.com".to_string()
}

fn default_twilio_base_url() -> String {
    "https://api.twilio.com".to_string()
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_by_default() {
        assert!(!PushConfig::default().is_configured());
        assert!(!SmsConfig::default().is_configured());
    }

    #[test]
    fn test_sms_requires_sender_number() {
        let config = SmsConfig {
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            ..SmsConfig::default()
        };
        assert!(!config.is_configured());
    }
}
