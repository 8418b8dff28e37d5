use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use stagehand_core::config::Config;
use stagehand_core::tracing::init_tracing;
use stagehand_marketplace::config::MarketplaceConfig;
use stagehand_marketplace::router::build_router;
use stagehand_marketplace::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = MarketplaceConfig::from_env().context("load config from environment")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    let state = AppState::new(db, &config);
    let router = build_router(state);

    let http_addr = format!("0.0.0.0:{}", config.marketplace_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("bind {http_addr}"))?;

    info!("marketplace service listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
