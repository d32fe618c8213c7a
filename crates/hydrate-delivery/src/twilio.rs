//! Twilio SMS transport.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use hydrate_core::config::SmsConfig;
use hydrate_core::error::AppError;
use hydrate_core::result::AppResult;
use hydrate_core::traits::transport::SmsTransport;
use hydrate_core::types::message::SmsMessage;

use crate::error::TransportError;
use crate::{build_client, status_error};

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: Option<String>,
}

/// SMS transport over Twilio's Messages resource.
#[derive(Debug, Clone)]
pub struct TwilioSmsTransport {
    client: reqwest::Client,
    endpoint: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl TwilioSmsTransport {
    /// Build the transport, or `None` when SMS credentials are absent.
    pub fn from_config(config: &SmsConfig) -> AppResult<Option<Self>> {
        if !config.is_configured() {
            return Ok(None);
        }
        Ok(Some(Self {
            client: build_client(config.timeout_seconds)?,
            endpoint: format!(
                "{}/2010-04-01/Accounts/{}/Messages.json",
                config.base_url.trim_end_matches('/'),
                config.account_sid
            ),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
        }))
    }

    /// The configured sender number.
    pub fn from_number(&self) -> &str {
        &self.from_number
    }

    fn form<'a>(&'a self, message: &'a SmsMessage) -> [(&'static str, &'a str); 3] {
        let from = if message.from.is_empty() {
            self.from_number.as_str()
        } else {
            message.from.as_str()
        };
        [
            ("To", message.to.as_str()),
            ("From", from),
            ("Body", message.body.as_str()),
        ]
    }

    async fn try_send(&self, message: &SmsMessage) -> Result<String, TransportError> {
        let form = self.form(message);
        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form[..])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let parsed: MessageResource = response.json().await?;
        parsed
            .sid
            .filter(|s| !s.is_empty())
            .ok_or_else(|| TransportError::InvalidResponse("missing message sid".to_string()))
    }
}

#[async_trait]
impl SmsTransport for TwilioSmsTransport {
    async fn send(&self, message: &SmsMessage) -> AppResult<String> {
        let sid = self.try_send(message).await.map_err(AppError::from)?;
        debug!(message_sid = %sid, "Twilio accepted SMS");
        Ok(sid)
    }

    fn name(&self) -> &'static str {
        "twilio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> SmsConfig {
        SmsConfig {
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            from_number: "+15550000000".to_string(),
            ..SmsConfig::default()
        }
    }

    #[test]
    fn test_endpoint_includes_account() {
        let transport = TwilioSmsTransport::from_config(&configured()).unwrap().unwrap();
        assert_eq!(
            transport.endpoint,
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn test_blank_sender_falls_back_to_configured_number() {
        let transport = TwilioSmsTransport::from_config(&configured()).unwrap().unwrap();
        let message = SmsMessage {
            to: "+15551234567".to_string(),
            from: String::new(),
            body: "Drink up".to_string(),
        };
        let form = transport.form(&message);
        assert_eq!(form[1], ("From", "+15550000000"));
        assert_eq!(form[0], ("To", "+15551234567"));
    }

    #[test]
    fn test_missing_sender_is_unconfigured() {
        let config = SmsConfig {
            from_number: String::new(),
            ..configured()
        };
        assert!(TwilioSmsTransport::from_config(&config).unwrap().is_none());
    }
}
