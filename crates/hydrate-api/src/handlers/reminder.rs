//! Reminder handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use validator::Validate;

use hydrate_core::error::AppError;

use crate::dto::request::SendReminderRequest;
use crate::dto::response::{ApiResponse, ReminderResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/reminders/send
pub async fn send_reminder(
    State(state): State<AppState>,
    Json(req): Json<SendReminderRequest>,
) -> Result<Json<ApiResponse<ReminderResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))?;

    let result = state.reminders.send(&req.into(), Utc::now()).await?;
    Ok(Json(ApiResponse::ok(result.into())))
}
