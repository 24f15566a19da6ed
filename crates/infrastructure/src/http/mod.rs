//! 协作服务HTTP客户端
//!
//! 每个客户端封装一个外部服务的网络调用，并把传输错误、非成功状态码
//! 和无法解析的报文映射为本地错误模型。

pub mod ambulance_registry;
pub mod hospital_directory;
pub mod route_provider;

pub use ambulance_registry::HttpAmbulanceRegistry;
pub use hospital_directory::HttpHospitalDirectory;
pub use route_provider::HttpRouteProvider;

use std::time::Duration;

use dispatch_core::{CoordinatorResult, DispatchError};

/// 创建带请求超时的HTTP客户端，三个协作服务客户端共享同一个连接池
pub fn build_http_client(request_timeout: Duration) -> CoordinatorResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(request_timeout)
        .build()
        .map_err(|e| DispatchError::Configuration(format!("创建HTTP客户端失败: {e}")))
}

pub(crate) fn normalize_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}
