use std::time::Duration;

use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use videos_composite_migration::{Migrator, MigratorTrait};

use crate::config::Args;

/// 优先使用 DATABASE_URL，否则由 DB_* 参数拼出 MySQL 连接串
pub fn database_url(args: &Args) -> String {
    if let Some(url) = args.database_url.as_deref().filter(|url| !url.is_empty()) {
        return url.to_owned();
    }
    format!(
        "mysql://{}:{}@{}:{}/{}",
        urlencoding::encode(&args.db_user),
        urlencoding::encode(&args.db_pass),
        args.db_host,
        args.db_port,
        args.db_name
    )
}

pub async fn database_connection(args: &Args) -> Result<DatabaseConnection> {
    let mut option = ConnectOptions::new(database_url(args));
    option
        .max_connections(args.max_connections)
        .min_connections(args.min_connections)
        .acquire_timeout(Duration::from_secs(args.acquire_timeout));
    Ok(Database::connect(option).await?)
}

pub async fn migrate_database(connection: &DatabaseConnection) -> Result<()> {
    Ok(Migrator::up(connection, None).await?)
}
