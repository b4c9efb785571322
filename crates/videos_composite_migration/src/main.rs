use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(videos_composite_migration::Migrator).await;
}
