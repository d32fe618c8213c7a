//! Manual batch trigger.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::dto::response::{ApiResponse, DrainResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/worker/drain
///
/// Returns 409 when a scheduled run is already in progress.
pub async fn drain(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DrainResponse>>, ApiError> {
    let report = state.batch.run_once(Utc::now()).await?;
    Ok(Json(ApiResponse::ok(report.into())))
}
