use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dispatch_core::DispatchError;
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("调度错误: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("请求参数错误: {0}")]
    BadRequest(String),

    #[error("未找到资源")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, error_type, suggestions) = match &self {
            ApiError::Dispatch(DispatchError::CaseNotFound { id }) => (
                StatusCode::NOT_FOUND,
                format!("案例 ID {} 不存在", id),
                "CASE_NOT_FOUND",
                vec![
                    "请检查案例ID是否正确".to_string(),
                    "使用 GET /cases 查看所有案例".to_string(),
                ],
            ),
            ApiError::Dispatch(DispatchError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                format!("请求参数验证失败: {}", msg),
                "VALIDATION_ERROR",
                vec!["请检查请求参数是否符合要求".to_string()],
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                format!("请求参数错误: {}", msg),
                "BAD_REQUEST",
                vec![
                    "请检查JSON格式是否正确".to_string(),
                    "确保Content-Type设置为application/json".to_string(),
                ],
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "请求的资源不存在".to_string(),
                "NOT_FOUND",
                vec!["请检查请求URL是否正确".to_string()],
            ),
            ApiError::Dispatch(err) => {
                error!(error = %err, "Request failed with dispatch error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "系统内部错误".to_string(),
                    "INTERNAL_ERROR",
                    vec![
                        "系统遇到内部错误，请稍后重试".to_string(),
                        "查看 GET /health 检查系统状态".to_string(),
                    ],
                )
            }
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type,
                "code": status.as_u16(),
                "suggestions": suggestions,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
