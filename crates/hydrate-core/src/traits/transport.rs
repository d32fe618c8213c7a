//! Transport traits for the outbound collaborators.
//!
//! Concrete HTTP implementations live in `hydrate-delivery`; tests plug in
//! fakes. Implementations return the provider's message identifier on
//! success and an [`AppError`](crate::AppError) on any failure. Callers
//! decide whether a failure is fatal.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::message::{GenerationRequest, PushMessage, SmsMessage};

/// Delivers push notifications to devices.
#[async_trait]
pub trait PushTransport: Send + Sync + std::fmt::Debug + 'static {
    /// Send one notification. Returns the provider message id.
    async fn send(&self, message: &PushMessage) -> AppResult<String>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;
}

/// Delivers SMS messages.
#[async_trait]
pub trait SmsTransport: Send + Sync + std::fmt::Debug + 'static {
    /// Send one text message. Returns the provider message id.
    async fn send(&self, message: &SmsMessage) -> AppResult<String>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;
}

/// Generates short natural-language reminder text.
#[async_trait]
pub trait TextGenerator: Send + Sync + std::fmt::Debug + 'static {
    /// Generate text for the request. May return an empty string, which
    /// callers treat the same as a failure.
    async fn generate(&self, request: &GenerationRequest) -> AppResult<String>;
}
