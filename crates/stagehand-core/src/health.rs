use axum::response::IntoResponse;

use crate::envelope::ApiResponse;

/// Handler for `GET /healthz`: liveness only, never touches dependencies.
pub async fn healthz() -> impl IntoResponse {
    ApiResponse::message("ok")
}
