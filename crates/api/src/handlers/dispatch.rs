use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use dispatch_core::{DispatchError, DispatchResult, EmergencyRequest, EmergencyRequestPayload};

use crate::routes::AppState;

/// 处理紧急调度请求
///
/// 成功返回200，业务失败返回404，请求不合法返回400，
/// 案例存储或内部故障返回500，响应体都是 `DispatchResult`。
pub async fn dispatch_emergency(
    State(state): State<AppState>,
    payload: Result<Json<EmergencyRequestPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected malformed emergency request");
            let result = DispatchResult::failure(format!(
                "invalid emergency request: {}",
                rejection.body_text()
            ));
            return (StatusCode::BAD_REQUEST, Json(result)).into_response();
        }
    };

    let request = match EmergencyRequest::try_from(payload) {
        Ok(request) => request,
        Err(error) => {
            warn!(error = %error, "Rejected invalid emergency request");
            return (StatusCode::BAD_REQUEST, Json(DispatchResult::from(&error))).into_response();
        }
    };

    // 截止时间从进入处理器时开始计算，请求超时必须大于该预算
    let ctx = state.coordinator.default_context();
    match state.coordinator.dispatch(ctx, request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => {
            let status = failure_status(&error);
            (status, Json(DispatchResult::from(&error))).into_response()
        }
    }
}

/// 业务失败与基础设施故障分开映射
fn failure_status(error: &DispatchError) -> StatusCode {
    match error.kind() {
        "validation" => StatusCode::BAD_REQUEST,
        "case_store" | "internal" => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::NOT_FOUND,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_status_mapping() {
        assert_eq!(
            failure_status(&DispatchError::RouteCalculationFailed { ambulance_id: 1 }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            failure_status(&DispatchError::DeadlineExceeded { stage: "route" }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            failure_status(&DispatchError::Validation("latitude is required".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            failure_status(&DispatchError::CaseStore("disk full".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            failure_status(&DispatchError::Internal("task panicked".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
