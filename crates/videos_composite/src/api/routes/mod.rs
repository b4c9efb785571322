use std::sync::Arc;

use axum::extract::Extension;
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::response::{HealthResponse, MessageResponse};
use crate::api::wrapper::ApiError;

mod videos;

/// 完整的应用路由，数据库连接池通过 Extension 注入各个 handler
pub fn app(database_connection: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(videos::router())
        .layer(Extension(database_connection))
        .layer(TraceLayer::new_for_http())
        // 仅供内部服务调用，允许任意来源
        .layer(CorsLayer::permissive())
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Videos Composite Microservice running".into(),
    })
}

pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// 与 healthz 不同，readyz 会检查数据库是否可用
pub async fn readyz(Extension(db): Extension<Arc<DatabaseConnection>>) -> Result<Json<HealthResponse>, ApiError> {
    db.ping().await?;
    Ok(Json(HealthResponse { ok: true }))
}
