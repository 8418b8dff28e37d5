use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use stagehand_core::envelope::{ApiResponse, failure};

use crate::state::AppState;

/// Handler for `GET /readyz`: 200 once the database answers, 503 otherwise.
pub async fn readyz(State(state): State<AppState>) -> Response {
    match state.repo().ping().await {
        Ok(()) => ApiResponse::message("ok").into_response(),
        Err(e) => {
            tracing::warn!(error = ?e, "readiness check failed");
            failure(StatusCode::SERVICE_UNAVAILABLE, "Service unavailable", Vec::new())
        }
    }
}
