//! Transport error type.

use hydrate_core::error::{AppError, ErrorKind};

/// Failure talking to an outbound provider.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response (network, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("Provider returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The provider answered 2xx with a body we could not use.
    #[error("Unexpected provider response: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    /// Whether the failure was a client-side timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }
}

impl From<TransportError> for AppError {
    fn from(err: TransportError) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else {
            ErrorKind::ExternalService
        };
        let message = err.to_string();
        AppError::with_source(kind, message, err)
    }
}
