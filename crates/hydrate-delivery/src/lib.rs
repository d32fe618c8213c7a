//! # hydrate-delivery
//!
//! Concrete implementations of the `hydrate-core` transport traits:
//!
//! - [`FcmPushTransport`]: Firebase Cloud Messaging HTTP v1
//! - [`TwilioSmsTransport`]: Twilio Programmable Messaging
//! - [`GeminiTextGenerator`]: Gemini `generateContent`
//!
//! Each transport is built from its config section and returns
//! `Ok(None)` from `from_config` when credentials are absent.

pub mod error;
pub mod fcm;
pub mod gemini;
pub mod twilio;

pub use error::TransportError;
pub use fcm::FcmPushTransport;
pub use gemini::GeminiTextGenerator;
pub use twilio::TwilioSmsTransport;

use std::time::Duration;

use hydrate_core::error::{AppError, ErrorKind};

/// Longest provider error body kept in error messages.
const MAX_ERROR_BODY: usize = 512;

/// Build a client with a per-request timeout.
pub(crate) fn build_client(timeout_seconds: u64) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds.max(1)))
        .build()
        .map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
        })
}

/// Turn a non-success response into a [`TransportError::Status`].
pub(crate) async fn status_error(response: reqwest::Response) -> TransportError {
    let status = response.status().as_u16();
    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        body.truncate(cut);
    }
    TransportError::Status { status, body }
}
