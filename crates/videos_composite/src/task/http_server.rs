use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sea_orm::DatabaseConnection;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

use crate::api::app;

pub async fn http_server(
    database_connection: Arc<DatabaseConnection>,
    bind_address: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    // 路由匹配前去掉末尾的斜杠，/videos/ 与 /videos 等价
    let app = NormalizePathLayer::trim_trailing_slash().layer(app(database_connection));
    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .context("bind address failed")?;
    info!("HTTP 服务开始监听：http://{}", listener.local_addr()?);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
