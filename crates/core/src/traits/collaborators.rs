//! 外部协作服务的能力接口
//!
//! 调度协调器只通过这些窄接口访问医院目录、救护车注册与路线服务，
//! 生产环境由HTTP客户端实现，测试中使用内存替身。
//!
//! 三个接口的失败语义不同：
//! - `HospitalDirectory` 返回 `CoordinatorResult`，空列表是正常结果，
//!   传输/状态码/报文错误统一映射为 `DispatchError::CollaboratorUnavailable`
//! - `RouteProvider` 从不返回错误，任何失败都以 `RouteStatus::Failure` 表达
//! - `AmbulanceRegistry` 只返回是否成功

use async_trait::async_trait;

use crate::{
    errors::CoordinatorResult,
    models::{Ambulance, GeoPoint, Hospital, RouteResult},
};

/// 医院目录服务接口
#[async_trait]
pub trait HospitalDirectory: Send + Sync {
    /// 按专科查询医院
    async fn find_by_specialization(&self, specialization: &str) -> CoordinatorResult<Vec<Hospital>>;

    /// 查询医院下属的救护车
    async fn find_ambulances(&self, hospital_id: i64) -> CoordinatorResult<Vec<Ambulance>>;
}

/// 救护车注册服务接口
#[async_trait]
pub trait AmbulanceRegistry: Send + Sync {
    /// 更新救护车可用状态，失败时返回false
    async fn set_availability(&self, ambulance_id: i64, available: bool) -> bool;
}

/// 路线规划服务接口
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// 计算从起点到终点的路线
    async fn compute_route(&self, origin: GeoPoint, destination: GeoPoint) -> RouteResult;
}
