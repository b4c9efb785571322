use anyhow::Error;
use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::IntoResponse;
use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::api::error::InnerApiError;

/// 错误响应体，与 Search / Upload 服务约定的 `{"detail": "..."}` 格式
#[derive(Serialize)]
pub struct ErrorBody {
    detail: String,
}

pub struct ApiError(Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(value: E) -> Self {
        Self(value.into())
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0.downcast_ref::<InnerApiError>() {
            Some(InnerApiError::NotFound(_)) => StatusCode::NOT_FOUND,
            Some(InnerApiError::Conflict { .. }) => StatusCode::FORBIDDEN,
            Some(InnerApiError::BadRequest(_)) => StatusCode::BAD_REQUEST,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        let detail = if status_code.is_server_error() {
            error!("处理请求时遇到数据库错误：{:#}", self.0);
            format!("DB error: {}", self.0)
        } else {
            self.0.to_string()
        };
        (status_code, Json(ErrorBody { detail })).into_response()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| InnerApiError::BadRequest(e.body_text()))?;
        value
            .validate()
            .map_err(|e| InnerApiError::BadRequest(e.to_string()))?;
        Ok(ValidatedJson(value))
    }
}

/// 查询参数解析失败时同样返回 `{"detail": "..."}`，而不是 axum 默认的纯文本
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| InnerApiError::BadRequest(e.body_text()))?;
        Ok(QueryParams(value))
    }
}
