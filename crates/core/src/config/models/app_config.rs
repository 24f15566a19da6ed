use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{
    api_observability::{ApiConfig, ObservabilityConfig},
    collaborators::CollaboratorsConfig,
    database::DatabaseConfig,
    dispatcher::DispatcherConfig,
};

/// 默认配置文件搜索路径
const DEFAULT_CONFIG_PATHS: [&str; 3] = [
    "config/dispatch.toml",
    "dispatch.toml",
    "/etc/ambulance-dispatch/config.toml",
];

/// System configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub collaborators: CollaboratorsConfig,
    pub dispatcher: DispatcherConfig,
    pub database: DatabaseConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from config file and environment variables
    ///
    /// Load order:
    /// 1. Default configuration
    /// 2. Config file (TOML format)
    /// 3. Environment variable overrides (prefix: DISPATCH_, nested keys joined by `__`)
    ///
    /// # Arguments
    ///
    /// * `config_path` - Config file path, if None use default paths
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let defaults = Config::try_from(&AppConfig::default()).context("构建默认配置失败")?;
        let mut builder = Config::builder().add_source(defaults);

        // 1. Load config file if provided
        if let Some(path) = config_path {
            if Path::new(path).exists() {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            } else {
                return Err(anyhow::anyhow!("配置文件不存在: {}", path));
            }
        } else if let Some(path) = DEFAULT_CONFIG_PATHS
            .iter()
            .find(|path| Path::new(path).exists())
        {
            builder = builder.add_source(File::new(path, FileFormat::Toml));
        }

        // 2. Environment variable overrides - highest priority
        builder = builder.add_source(
            Environment::with_prefix("DISPATCH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .context("构建配置失败")?
            .try_deserialize()
            .context("反序列化配置失败")?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_str).context("解析TOML配置失败")?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("序列化配置为TOML失败")
    }

    /// Validate configuration effectiveness
    pub fn validate(&self) -> Result<()> {
        self.api.validate().context("API配置验证失败")?;

        self.collaborators
            .validate()
            .context("协作服务配置验证失败")?;

        self.dispatcher
            .validate()
            .context("Dispatcher配置验证失败")?;

        self.database.validate().context("数据库配置验证失败")?;

        self.observability
            .validate()
            .context("可观测性配置验证失败")?;

        // 请求超时会丢弃正在执行的调度，必须覆盖整个调度预算
        let dispatch_budget = self.dispatcher.pipeline_timeout_seconds
            + self.collaborators.request_timeout_seconds;
        if self.api.request_timeout_seconds <= dispatch_budget {
            return Err(anyhow::anyhow!(
                "api.request_timeout_seconds ({}) 必须大于调度流程超时与协作服务请求超时之和 ({})",
                self.api.request_timeout_seconds,
                dispatch_budget
            ));
        }

        Ok(())
    }
}
