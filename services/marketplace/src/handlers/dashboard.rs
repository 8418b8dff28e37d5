use axum::extract::State;
use chrono::Utc;
use serde::Serialize;

use stagehand_core::envelope::ApiResponse;

use crate::error::MarketplaceError;
use crate::handlers::extract::Auth;
use crate::state::AppState;
use crate::usecase::dashboard::{AdminStats, ArtistStats, DashboardStats, DashboardUseCase};

#[derive(Serialize)]
pub struct StatsResponse<S> {
    pub stats: S,
}

// ── GET /dashboard ───────────────────────────────────────────────────────────

pub async fn dashboard(
    Auth(principal): Auth,
    State(state): State<AppState>,
) -> Result<ApiResponse<StatsResponse<DashboardStats>>, MarketplaceError> {
    let usecase = DashboardUseCase { repo: state.repo() };
    let stats = usecase
        .execute(&principal, Utc::now().date_naive())
        .await?;
    Ok(ApiResponse::ok(
        "Dashboard data retrieved successfully",
        StatsResponse { stats },
    ))
}

// ── GET /dashboard/admin ─────────────────────────────────────────────────────

pub async fn admin_dashboard(
    Auth(principal): Auth,
    State(state): State<AppState>,
) -> Result<ApiResponse<StatsResponse<AdminStats>>, MarketplaceError> {
    let usecase = DashboardUseCase { repo: state.repo() };
    let stats = usecase.admin(&principal).await?;
    Ok(ApiResponse::ok(
        "Admin dashboard retrieved successfully",
        StatsResponse { stats },
    ))
}

// ── GET /dashboard/artist ────────────────────────────────────────────────────

pub async fn artist_dashboard(
    Auth(principal): Auth,
    State(state): State<AppState>,
) -> Result<ApiResponse<StatsResponse<ArtistStats>>, MarketplaceError> {
    let usecase = DashboardUseCase { repo: state.repo() };
    let stats = usecase
        .artist(&principal, Utc::now().date_naive())
        .await?;
    Ok(ApiResponse::ok(
        "Artist dashboard retrieved successfully",
        StatsResponse { stats },
    ))
}
