use axum::extract::State;

use crate::{
    error::{ApiError, ApiResult},
    routes::AppState,
};

/// 以Prometheus文本格式输出指标
pub async fn render_metrics(State(state): State<AppState>) -> ApiResult<String> {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .ok_or(ApiError::NotFound)
}
