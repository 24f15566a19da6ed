use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use tracing::info;

use dispatch_core::{Case, DispatchError};

use crate::{
    error::{ApiError, ApiResult},
    response::{success, ApiResponse},
    routes::AppState,
};

/// 获取案例列表，按id升序
pub async fn list_cases(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let cases = state.case_store.list_cases().await?;
    Ok(success(cases))
}

/// 获取案例详情
pub async fn get_case(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let case = state
        .case_store
        .get_case(id)
        .await?
        .ok_or(DispatchError::CaseNotFound { id })?;
    Ok(success(case))
}

/// 用请求体替换案例内容，id以路径为准
pub async fn update_case(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<Case>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(mut case) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    case.id = id;

    let updated = state.case_store.update_case(&case).await?;
    info!(case_id = id, status = %updated.status, "Case updated");

    Ok(ApiResponse::success_with_message(
        updated,
        "案例已更新".to_string(),
    ))
}
