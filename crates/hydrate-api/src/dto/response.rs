//! Response DTOs.

use serde::{Deserialize, Serialize};

use hydrate_entity::notification::DeliveryChannel;
use hydrate_service::{ReminderResult, SkipReason};
use hydrate_worker::BatchReport;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Outcome of a send-reminder request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderResponse {
    /// Whether a channel delivered.
    pub success: bool,
    /// Channel(s) that delivered.
    pub method: DeliveryChannel,
    /// The body that was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_text: Option<String>,
    /// Delivery diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Gate that short-circuited the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
}

impl From<ReminderResult> for ReminderResponse {
    fn from(result: ReminderResult) -> Self {
        Self {
            success: result.success,
            method: result.method,
            message_text: result.message_text,
            error: result.error,
            skipped: result.skipped,
        }
    }
}

/// Batch run counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrainResponse {
    /// Due records returned by the queue.
    pub fetched: usize,
    /// Records marked processed.
    pub processed: usize,
    /// Records marked failed.
    pub failed: usize,
    /// Records another runner finished first.
    pub conflicts: usize,
    /// Records whose outcome could not be stored.
    pub unrecorded: usize,
    /// Records left for the next run.
    pub deferred: usize,
}

impl From<BatchReport> for DrainResponse {
    fn from(report: BatchReport) -> Self {
        Self {
            fetched: report.fetched,
            processed: report.processed,
            failed: report.failed,
            conflicts: report.conflicts,
            unrecorded: report.unrecorded,
            deferred: report.deferred,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// `connected`, `unreachable`, or `memory`.
    pub database: String,
}
