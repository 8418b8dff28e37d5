use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(stagehand_marketplace_migration::Migrator).await;
}
