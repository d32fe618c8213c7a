//! Delivery methods, channels, and outcomes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use hydrate_core::error::AppError;

/// The channel selection requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Push if possible, otherwise SMS.
    #[default]
    Auto,
    /// Push, falling back to SMS on failure.
    Fcm,
    /// SMS only.
    Sms,
    /// Both channels.
    Both,
}

impl DeliveryMethod {
    /// Return the method as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Fcm => "fcm",
            Self::Sms => "sms",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeliveryMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "fcm" | "push" => Ok(Self::Fcm),
            "sms" => Ok(Self::Sms),
            "both" => Ok(Self::Both),
            other => Err(AppError::validation(format!(
                "Unknown delivery method: '{other}'"
            ))),
        }
    }
}

/// The channel(s) that actually delivered a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryChannel {
    /// Push succeeded.
    Fcm,
    /// SMS succeeded.
    Sms,
    /// Both succeeded.
    Both,
    /// Nothing was delivered.
    #[default]
    None,
}

impl DeliveryChannel {
    /// Combine per-channel success flags.
    pub fn from_results(fcm_ok: bool, sms_ok: bool) -> Self {
        match (fcm_ok, sms_ok) {
            (true, true) => Self::Both,
            (true, false) => Self::Fcm,
            (false, true) => Self::Sms,
            (false, false) => Self::None,
        }
    }

    /// Return the channel as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fcm => "fcm",
            Self::Sms => "sms",
            Self::Both => "both",
            Self::None => "none",
        }
    }
}

impl fmt::Display for DeliveryChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one dispatch attempt. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    /// Which channel(s) delivered.
    pub channel_attempted: DeliveryChannel,
    /// Whether at least one channel delivered.
    pub success: bool,
    /// Accumulated per-channel errors, `"; "`-separated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Push provider message id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_message_id: Option<String>,
    /// SMS provider message id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sms_message_id: Option<String>,
}

impl DeliveryOutcome {
    /// An outcome where nothing was attempted or delivered.
    pub fn none(error: impl Into<String>) -> Self {
        Self {
            channel_attempted: DeliveryChannel::None,
            success: false,
            error: Some(error.into()),
            push_message_id: None,
            sms_message_id: None,
        }
    }
}
