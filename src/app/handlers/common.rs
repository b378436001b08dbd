// ==========================================
// 公共工具：错误映射、阻塞任务调度、分页参数
// ==========================================

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator;
use crate::app::state::AppState;
use crate::repository::sql_builder::Page;

/// 错误响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub detail: String,
}

/// 删除成功等简单消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn deleted(entity: &str) -> Json<Self> {
        Json(Self {
            message: format!("{} deleted successfully", entity),
        })
    }
}

/// HTTP 层错误 (ApiError 的响应包装)
#[derive(Debug)]
pub struct HttpError(pub ApiError);

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        HttpError(err)
    }
}

/// ApiError -> HTTP 状态码
pub fn status_for(err: &ApiError) -> StatusCode {
    match err {
        ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        ApiError::InvalidInput(_) | ApiError::ValidationError(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ApiError::Conflict(_) | ApiError::BusinessRuleViolation(_) => StatusCode::CONFLICT,
        ApiError::DatabaseError(_)
        | ApiError::DatabaseConnectionError(_)
        | ApiError::DatabaseTransactionError(_)
        | ApiError::InternalError(_)
        | ApiError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(code = self.0.code(), error = %self.0, "请求处理失败");
        } else {
            tracing::debug!(code = self.0.code(), error = %self.0, "请求被拒绝");
        }

        let body = ErrorBody {
            code: self.0.code().to_string(),
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type HttpResult<T> = Result<Json<T>, HttpError>;

/// 在 tokio 阻塞线程池上执行同步 API 调用 (rusqlite 为同步接口)
pub async fn run_blocking<T, F>(f: F) -> HttpResult<T>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::InternalError(format!("blocking task failed: {}", e)))?;
    result.map(Json).map_err(HttpError::from)
}

/// 分页查询参数
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn page(&self, state: &AppState) -> Page {
        validator::page(self.skip, self.limit, state.max_page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&ApiError::not_found("Repair")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&ApiError::ValidationError("x".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&ApiError::Conflict("x".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&ApiError::DatabaseError("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
