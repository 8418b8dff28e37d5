use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::MarketplaceConfig;
use crate::infra::db::DbRepository;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: Arc<str>,
    pub token_ttl_secs: u64,
    pub default_per_page: u32,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &MarketplaceConfig) -> Self {
        Self {
            db,
            jwt_secret: Arc::from(config.jwt_secret.as_str()),
            token_ttl_secs: config.token_ttl_secs,
            default_per_page: config.default_per_page,
        }
    }

    pub fn repo(&self) -> DbRepository {
        DbRepository {
            db: self.db.clone(),
        }
    }
}
