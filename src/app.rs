use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use dispatch_api::{create_app, AppState};
use dispatch_core::{AppConfig, CaseStore};
use dispatch_dispatcher::DispatchCoordinator;
use dispatch_infrastructure::{
    build_http_client, connect_case_store, install_prometheus_recorder, HttpAmbulanceRegistry,
    HttpHospitalDirectory, HttpRouteProvider, MetricsCollector, SqliteCaseRepository,
};
use tokio::{net::TcpListener, sync::broadcast};
use tracing::info;

/// 主应用程序
pub struct Application {
    config: AppConfig,
    state: AppState,
}

impl Application {
    /// 组装协作服务客户端、案例存储和调度协调器
    pub async fn new(config: AppConfig) -> Result<Self> {
        info!("初始化急救调度协调服务");

        let http_client = build_http_client(Duration::from_secs(
            config.collaborators.request_timeout_seconds,
        ))
        .context("创建HTTP客户端失败")?;

        let hospital_directory = Arc::new(HttpHospitalDirectory::new(
            config.collaborators.hospital_directory_url.clone(),
            http_client.clone(),
        ));
        let ambulance_registry = Arc::new(HttpAmbulanceRegistry::new(
            config.collaborators.ambulance_registry_url.clone(),
            http_client.clone(),
        ));
        let route_provider = Arc::new(HttpRouteProvider::new(
            config.collaborators.route_provider_url.clone(),
            http_client,
        ));

        let pool = connect_case_store(&config.database)
            .await
            .with_context(|| format!("连接案例数据库失败: {}", config.database.url))?;
        let case_store: Arc<dyn CaseStore> = Arc::new(SqliteCaseRepository::new(pool));

        // 记录器必须先于指标句柄创建
        let metrics_handle = if config.observability.metrics_enabled {
            Some(install_prometheus_recorder()?)
        } else {
            None
        };
        let metrics = Arc::new(MetricsCollector::new());

        let coordinator = Arc::new(DispatchCoordinator::new(
            hospital_directory,
            ambulance_registry,
            route_provider,
            Arc::clone(&case_store),
            config.dispatcher.clone(),
            metrics,
        ));

        info!(
            hospital_directory = %config.collaborators.hospital_directory_url,
            ambulance_registry = %config.collaborators.ambulance_registry_url,
            route_provider = %config.collaborators.route_provider_url,
            "协作服务客户端已就绪"
        );

        Ok(Self {
            config,
            state: AppState {
                coordinator,
                case_store,
                metrics_handle,
            },
        })
    }

    /// 运行API服务器直到收到关闭信号
    pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        let app = create_app(
            self.state.clone(),
            &self.config.api,
            &self.config.observability.metrics_endpoint,
        );

        let listener = TcpListener::bind(&self.config.api.bind_address)
            .await
            .with_context(|| format!("绑定地址失败: {}", self.config.api.bind_address))?;

        info!("API服务器启动在 http://{}", self.config.api.bind_address);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("API服务器收到关闭信号");
            })
            .await
            .context("API服务器运行失败")?;

        info!("API服务器已停止");
        Ok(())
    }
}
