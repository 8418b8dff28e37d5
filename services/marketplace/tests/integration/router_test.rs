//! Requests that are answered before any query runs, so the router can be
//! driven without a database.

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderValue, StatusCode};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use uuid::Uuid;

use stagehand_marketplace::router::build_router;
use stagehand_marketplace::state::AppState;
use stagehand_testing::auth::{MockAuth, TEST_JWT_SECRET};

fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        jwt_secret: Arc::from(TEST_JWT_SECRET),
        token_ttl_secs: 3600,
        default_per_page: 10,
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_answer_healthz_with_request_id() {
    let response = server().get("/healthz").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["success"], true);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_report_unready_without_database() {
    let response = server().get("/readyz").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["message"], "Service unavailable");
}

#[tokio::test]
async fn should_require_credentials_for_bookings() {
    let response = server().get("/api/v1/bookings").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Unauthorized");
}

#[tokio::test]
async fn should_reject_non_bearer_credentials() {
    let response = server()
        .get("/api/v1/organizations")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let auth = MockAuth::new(Uuid::now_v7()).with_secret("not-the-server-secret");
    let response = server()
        .get("/api/v1/me")
        .add_header(AUTHORIZATION, auth.header_value())
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_require_credentials_before_reading_the_body() {
    let response = server()
        .post("/api/v1/bookings")
        .json(&json!({"booking": {"service_id": Uuid::now_v7()}}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_malformed_login_body() {
    let response = server().post("/api/v1/login").text(r#"{"email": "#).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Malformed JSON request body"
    );
}

#[tokio::test]
async fn should_name_missing_signup_key() {
    let response = server()
        .post("/api/v1/signup")
        .json(&json!({"email": "ada@example.com", "password": "secret123"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "param is missing or the value is empty: user"
    );
}

#[tokio::test]
async fn should_reject_unknown_sort_column() {
    let response = server()
        .get("/api/v1/organizations")
        .add_query_param("sort_by", "password_digest")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Invalid sort_by: password_digest"
    );
}

#[tokio::test]
async fn should_reject_unknown_status_filter() {
    let response = server()
        .get("/api/v1/organizations")
        .add_query_param("status", "archived")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_require_credentials_to_delete() {
    let response = server().delete("/api/v1/organizations/not-a-uuid").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
