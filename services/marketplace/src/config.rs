use serde::Deserialize;

use stagehand_core::config::Config;
use stagehand_domain::pagination::DEFAULT_PER_PAGE;

/// Marketplace service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC key for bearer tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 3000). Env var: `MARKETPLACE_PORT`.
    #[serde(default = "default_port")]
    pub marketplace_port: u16,
    /// Bearer token lifetime (default 24h). Env var: `TOKEN_TTL_SECS`.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    /// Page size when `per_page` is omitted. Env var: `DEFAULT_PER_PAGE`.
    #[serde(default = "default_per_page")]
    pub default_per_page: u32,
}

fn default_port() -> u16 {
    3000
}

fn default_token_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

impl Config for MarketplaceConfig {}
