//! # Dispatch API
//!
//! 急救调度协调服务的REST API模块，基于Axum构建。
//!
//! ## API 端点
//!
//! - `POST /dispatch/emergency` - 为紧急请求调度最近的可用救护车
//! - `GET /cases` - 获取调度案例列表
//! - `GET /cases/{id}` - 获取案例详情
//! - `PUT /cases/{id}` - 更新案例（例如推进状态）
//! - `GET /health` - 健康检查
//! - `GET /metrics` - Prometheus指标（启用时）
//!
//! ## 调度响应
//!
//! 调度端点直接返回 `DispatchResult`：
//!
//! ```json
//! {
//!   "status": "SUCCESS",
//!   "assignedAmbulance": {"id": 11, "latitude": 40.7128, "longitude": -74.006, "available": true},
//!   "assignedHospital": {"id": 3, "name": "Mount Sinai", "specialization": "Cardiology", "ambulanceIds": [11]},
//!   "routePolyline": "poly1"
//! }
//! ```
//!
//! 业务失败返回404，请求缺少字段返回400，案例存储或内部故障返回500，
//! 响应体为 `{"status": "FAILURE", "failureReason": "..."}`。

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;

use axum::Router;
use dispatch_core::ApiConfig;

use middleware::{cors_layer, request_logging, timeout_layer, trace_layer};
use routes::create_routes;

pub use routes::AppState;

/// 创建完整的API应用
pub fn create_app(state: AppState, api_config: &ApiConfig, metrics_endpoint: &str) -> Router {
    let mut app = create_routes(state, metrics_endpoint)
        .layer(axum::middleware::from_fn(request_logging))
        .layer(timeout_layer(api_config.request_timeout_seconds));

    if api_config.cors_enabled {
        app = app.layer(cors_layer());
    }

    app.layer(trace_layer())
}
