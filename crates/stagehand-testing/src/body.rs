use axum::body::{Body, to_bytes};
use axum::http::Response;
use serde_json::Value;

/// Drain a response body and parse it as JSON.
pub async fn json_body(resp: Response<Body>) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
