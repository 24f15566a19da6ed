//! 配置管理
//!
//! 配置按 默认值 → TOML文件 → 环境变量 的顺序叠加加载，
//! 每个配置段都提供 `validate()` 校验。

pub mod models;

pub use models::{
    ApiConfig, AppConfig, CollaboratorsConfig, DatabaseConfig, DispatcherConfig,
    ObservabilityConfig,
};
