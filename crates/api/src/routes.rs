use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use dispatch_core::CaseStore;
use dispatch_dispatcher::DispatchCoordinator;

use crate::handlers::{
    cases::{get_case, list_cases, update_case},
    dispatch::dispatch_emergency,
    health::health_check,
    metrics::render_metrics,
};

/// API应用状态
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<DispatchCoordinator>,
    pub case_store: Arc<dyn CaseStore>,
    pub metrics_handle: Option<PrometheusHandle>,
}

/// 创建API路由
///
/// 只有安装了Prometheus记录器时才注册指标端点。
pub fn create_routes(state: AppState, metrics_endpoint: &str) -> Router {
    let mut router = Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 紧急调度
        .route("/dispatch/emergency", post(dispatch_emergency))
        // 案例管理
        .route("/cases", get(list_cases))
        .route("/cases/{id}", get(get_case).put(update_case));

    if state.metrics_handle.is_some() {
        router = router.route(metrics_endpoint, get(render_metrics));
    }

    router.with_state(state)
}
