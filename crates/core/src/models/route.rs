use serde::{Deserialize, Deserializer, Serialize};

/// 路线计算状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RouteStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILURE")]
    Failure,
}

// 无法识别的状态按失败处理
impl<'de> Deserialize<'de> for RouteStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let status = String::deserialize(deserializer)?;
        if status.eq_ignore_ascii_case("SUCCESS") {
            Ok(RouteStatus::Success)
        } else {
            Ok(RouteStatus::Failure)
        }
    }
}

/// 路线服务返回的路线结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub status: RouteStatus,
    /// 编码后的路径折线，对本服务不透明
    #[serde(rename = "geometry", alias = "polyline", default)]
    pub polyline_geometry: Option<String>,
    #[serde(rename = "distance", default)]
    pub distance_meters: f64,
    #[serde(rename = "duration", default)]
    pub duration_seconds: f64,
}

impl RouteResult {
    pub fn success(geometry: impl Into<String>, distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            status: RouteStatus::Success,
            polyline_geometry: Some(geometry.into()),
            distance_meters,
            duration_seconds,
        }
    }

    pub fn failure() -> Self {
        Self {
            status: RouteStatus::Failure,
            polyline_geometry: None,
            distance_meters: 0.0,
            duration_seconds: 0.0,
        }
    }

    /// 成功且带有路径数据
    pub fn is_success(&self) -> bool {
        self.status == RouteStatus::Success && self.polyline_geometry.is_some()
    }

    /// 丢失路径数据的成功响应视为失败
    pub fn normalized(self) -> Self {
        if self.status == RouteStatus::Success && self.polyline_geometry.is_none() {
            Self::failure()
        } else {
            self
        }
    }
}
