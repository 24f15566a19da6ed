use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    emergency::EmergencyRequest,
    fleet::{Ambulance, Hospital},
    route::RouteResult,
};
use crate::errors::DispatchError;

/// 调度案例状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Open => "OPEN",
            CaseStatus::InProgress => "IN_PROGRESS",
            CaseStatus::Completed => "COMPLETED",
            CaseStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(CaseStatus::Open),
            "IN_PROGRESS" => Ok(CaseStatus::InProgress),
            "COMPLETED" => Ok(CaseStatus::Completed),
            "CANCELLED" => Ok(CaseStatus::Cancelled),
            other => Err(DispatchError::Serialization(format!(
                "无效的案例状态: {other}"
            ))),
        }
    }
}

/// 一次成功调度的持久化记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    #[serde(default)]
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub specialization: String,
    pub status: CaseStatus,
    pub assigned_ambulance_id: i64,
    pub assigned_hospital_id: i64,
    #[serde(default)]
    pub estimated_duration_seconds: f64,
    #[serde(default)]
    pub estimated_distance_meters: f64,
    #[serde(default)]
    pub route_geometry: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Case {
    /// 根据调度结果构造新的OPEN案例，id由存储层分配
    pub fn open(
        request: &EmergencyRequest,
        ambulance: &Ambulance,
        hospital: &Hospital,
        route: &RouteResult,
    ) -> Self {
        Self {
            id: 0,
            latitude: request.latitude,
            longitude: request.longitude,
            specialization: request.specialization.clone(),
            status: CaseStatus::Open,
            assigned_ambulance_id: ambulance.id,
            assigned_hospital_id: hospital.id,
            estimated_duration_seconds: route.duration_seconds,
            estimated_distance_meters: route.distance_meters,
            route_geometry: route.polyline_geometry.clone().unwrap_or_default(),
            created_at: Utc::now(),
        }
    }
}
