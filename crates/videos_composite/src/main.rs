#[macro_use]
extern crate tracing;

mod api;
mod config;
mod database;
mod store;
mod task;
mod utils;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::{ARGS, version};
use crate::database::{database_connection, migrate_database};
use crate::task::http_server;
use crate::utils::init_logger;
use crate::utils::signal::shutdown_signal;

#[tokio::main]
async fn main() {
    // .env 中的变量需要在解析命令行参数之前载入
    let _ = dotenvy::dotenv();
    init_logger(&ARGS.log_level);
    info!("Videos Composite {} 启动中", version());
    if let Err(e) = run().await {
        error!("服务异常退出：{:#}", e);
        std::process::exit(1);
    }
    info!("服务已停止");
}

async fn run() -> Result<()> {
    let connection = Arc::new(database_connection(&ARGS).await.context("连接数据库失败")?);
    if ARGS.skip_migration {
        info!("已跳过数据库迁移");
    } else {
        migrate_database(&connection).await.context("数据库迁移失败")?;
        info!("数据库迁移完成");
    }
    http_server(connection, &ARGS.bind_address, shutdown_signal()).await
}
