use std::fmt;

use thiserror::Error;

/// 失败原因：没有提供所需专科的医院
pub const REASON_NO_HOSPITAL: &str = "no hospital with required specialization";
/// 失败原因：所有匹配医院都没有可用救护车
pub const REASON_NO_AVAILABLE_AMBULANCE: &str = "no available ambulances for required specialization";
/// 失败原因：路线服务未返回成功结果
pub const REASON_ROUTE_FAILED: &str = "route calculation failed";
/// 失败原因：救护车可用性更新失败
pub const REASON_RESERVATION_FAILED: &str = "failed to update ambulance availability";
/// 失败原因：案例持久化失败
pub const REASON_CASE_RECORD_FAILED: &str = "failed to record dispatch case";
/// 失败原因：协作服务不可用或超时
pub const REASON_COLLABORATOR_UNAVAILABLE: &str = "collaborator unavailable";

/// 调度流程依赖的外部协作方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collaborator {
    HospitalDirectory,
    AmbulanceRegistry,
    RouteProvider,
    CaseStore,
}

impl Collaborator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collaborator::HospitalDirectory => "hospital_directory",
            Collaborator::AmbulanceRegistry => "ambulance_registry",
            Collaborator::RouteProvider => "route_provider",
            Collaborator::CaseStore => "case_store",
        }
    }
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 调度协调错误类型定义
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("请求验证失败: {0}")]
    Validation(String),

    #[error("协作服务不可用: {collaborator} - {message}")]
    CollaboratorUnavailable {
        collaborator: Collaborator,
        message: String,
    },

    #[error("没有提供专科 {specialization} 的医院")]
    NoHospital { specialization: String },

    #[error("专科 {specialization} 没有可用救护车")]
    NoAvailableAmbulance { specialization: String },

    #[error("路线计算失败: 救护车 {ambulance_id}")]
    RouteCalculationFailed { ambulance_id: i64 },

    #[error("救护车预留失败: {ambulance_id}")]
    ReservationFailed { ambulance_id: i64 },

    #[error("调度阶段超时: {stage}")]
    DeadlineExceeded { stage: &'static str },

    #[error("案例存储错误: {0}")]
    CaseStore(String),

    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("案例未找到: {id}")]
    CaseNotFound { id: i64 },

    #[error("序列化错误: {0}")]
    Serialization(String),

    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

impl DispatchError {
    pub fn collaborator(collaborator: Collaborator, message: impl Into<String>) -> Self {
        DispatchError::CollaboratorUnavailable {
            collaborator,
            message: message.into(),
        }
    }

    /// 对外暴露的失败原因，写入 `DispatchResult.failure_reason`
    pub fn failure_reason(&self) -> String {
        match self {
            DispatchError::Validation(msg) => format!("invalid emergency request: {msg}"),
            DispatchError::NoHospital { .. } => REASON_NO_HOSPITAL.to_string(),
            DispatchError::NoAvailableAmbulance { .. } => REASON_NO_AVAILABLE_AMBULANCE.to_string(),
            DispatchError::RouteCalculationFailed { .. } => REASON_ROUTE_FAILED.to_string(),
            DispatchError::ReservationFailed { .. } => REASON_RESERVATION_FAILED.to_string(),
            DispatchError::CollaboratorUnavailable { .. } | DispatchError::DeadlineExceeded { .. } => {
                REASON_COLLABORATOR_UNAVAILABLE.to_string()
            }
            DispatchError::CaseStore(_)
            | DispatchError::Database(_)
            | DispatchError::CaseNotFound { .. }
            | DispatchError::Serialization(_) => REASON_CASE_RECORD_FAILED.to_string(),
            DispatchError::Configuration(_) | DispatchError::Internal(_) => "internal error".to_string(),
        }
    }

    /// 指标标签使用的错误分类
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::Validation(_) => "validation",
            DispatchError::CollaboratorUnavailable { .. } | DispatchError::DeadlineExceeded { .. } => {
                "collaborator_unavailable"
            }
            DispatchError::NoHospital { .. } | DispatchError::NoAvailableAmbulance { .. } => "no_match",
            DispatchError::RouteCalculationFailed { .. } => "route_failed",
            DispatchError::ReservationFailed { .. } => "reservation_failed",
            DispatchError::CaseStore(_)
            | DispatchError::Database(_)
            | DispatchError::CaseNotFound { .. }
            | DispatchError::Serialization(_) => "case_store",
            DispatchError::Configuration(_) | DispatchError::Internal(_) => "internal",
        }
    }
}

/// 统一的Result类型
pub type CoordinatorResult<T> = std::result::Result<T, DispatchError>;
