use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use stagehand_core::envelope::{ApiResponse, failure};
use stagehand_domain::user::UserRole;

use crate::domain::types::User;
use crate::error::MarketplaceError;
use crate::handlers::extract::{Auth, JsonBody, Params};
use crate::handlers::resources::Resource;
use crate::handlers::views::UserView;
use crate::state::AppState;
use crate::usecase::crud::GetUseCase;
use crate::usecase::session::{
    ChangePasswordInput, ChangePasswordUseCase, LoginUseCase, SignupUseCase, format_expiry,
};
use crate::usecase::user::UserParams;

/// Render a validation failure under a flow-specific message.
fn relabel(error: MarketplaceError, message: &str) -> Response {
    match error {
        MarketplaceError::Validation(errors) => failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            message,
            errors.into_messages(),
        ),
        other => other.into_response(),
    }
}

// ── POST /login ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// `%m-%d-%Y %H:%M`, UTC.
    pub exp: String,
    pub email: String,
    pub role: UserRole,
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>, MarketplaceError> {
    let usecase = LoginUseCase {
        repo: state.repo(),
        jwt_secret: state.jwt_secret.clone(),
        token_ttl_secs: state.token_ttl_secs,
    };
    let output = usecase.execute(&body.email, &body.password).await?;
    tracing::info!(user_id = %output.user.id, "login");
    Ok(ApiResponse::ok(
        "Login successful",
        LoginResponse {
            token: output.token.token,
            exp: format_expiry(output.token.exp),
            email: output.user.email,
            role: output.user.role,
        },
    ))
}

// ── POST /signup ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SignupResponse {
    pub user: UserView,
    pub token: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Params(params): Params<UserParams>,
) -> Result<Response, MarketplaceError> {
    let repo = state.repo();
    let usecase = SignupUseCase {
        repo: repo.clone(),
        jwt_secret: state.jwt_secret.clone(),
        token_ttl_secs: state.token_ttl_secs,
    };
    let output = match usecase.execute(params).await {
        Ok(output) => output,
        Err(e) => return Ok(relabel(e, "Registration failed")),
    };
    tracing::info!(user_id = %output.user.id, role = %output.user.role, "signup");
    let data = SignupResponse {
        user: output.user.render(&repo).await?,
        token: output.token.token,
    };
    Ok(ApiResponse::created("Account created successfully", data).into_response())
}

// ── DELETE /logout ───────────────────────────────────────────────────────────

/// Tokens are stateless; the client discards its own.
pub async fn logout(Auth(_principal): Auth) -> ApiResponse<()> {
    ApiResponse::message("Logged out successfully")
}

// ── GET /me ──────────────────────────────────────────────────────────────────

pub async fn me(
    Auth(principal): Auth,
    State(state): State<AppState>,
) -> Result<ApiResponse<UserView>, MarketplaceError> {
    let repo = state.repo();
    let usecase = GetUseCase { repo: repo.clone() };
    let user: User = usecase
        .execute(Some(&principal), principal.user_id)
        .await?;
    Ok(ApiResponse::ok(
        "Current user retrieved successfully",
        user.render(&repo).await?,
    ))
}

// ── PATCH /password/update ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    pub new_password: Option<String>,
    pub new_password_confirmation: Option<String>,
}

pub async fn update_password(
    Auth(principal): Auth,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ChangePasswordRequest>,
) -> Response {
    let usecase = ChangePasswordUseCase { repo: state.repo() };
    let input = ChangePasswordInput {
        current_password: body.current_password,
        new_password: body.new_password,
        new_password_confirmation: body.new_password_confirmation,
    };
    match usecase.execute(&principal, input).await {
        Ok(()) => ApiResponse::message("Password updated successfully").into_response(),
        Err(e) => relabel(e, "Failed to update password"),
    }
}
