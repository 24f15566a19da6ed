use serde::{Deserialize, Serialize};

use super::fleet::{Ambulance, Hospital};
use crate::errors::DispatchError;

/// 调度结果状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILURE")]
    Failure,
}

/// 一次紧急调度的输出
///
/// 成功时携带救护车、医院与路径折线；失败时只携带失败原因。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    pub status: DispatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_ambulance: Option<Ambulance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_hospital: Option<Hospital>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_polyline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl DispatchResult {
    pub fn success(ambulance: Ambulance, hospital: Hospital, route_polyline: String) -> Self {
        Self {
            status: DispatchStatus::Success,
            assigned_ambulance: Some(ambulance),
            assigned_hospital: Some(hospital),
            route_polyline: Some(route_polyline),
            failure_reason: None,
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            status: DispatchStatus::Failure,
            assigned_ambulance: None,
            assigned_hospital: None,
            route_polyline: None,
            failure_reason: Some(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == DispatchStatus::Success
    }
}

impl From<&DispatchError> for DispatchResult {
    fn from(error: &DispatchError) -> Self {
        DispatchResult::failure(error.failure_reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::REASON_ROUTE_FAILED;

    #[test]
    fn test_failure_result_omits_assignment_fields() {
        let result = DispatchResult::failure(REASON_ROUTE_FAILED);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["status"], "FAILURE");
        assert_eq!(json["failureReason"], REASON_ROUTE_FAILED);
        assert!(json.get("assignedAmbulance").is_none());
        assert!(json.get("routePolyline").is_none());
    }

    #[test]
    fn test_success_result_serialization() {
        let ambulance = Ambulance {
            id: 1,
            latitude: 40.7128,
            longitude: -74.006,
            available: true,
        };
        let hospital = Hospital {
            id: 2,
            name: "Mount Sinai".to_string(),
            specialization: "Cardiology".to_string(),
            ambulance_ids: vec![1],
        };
        let result = DispatchResult::success(ambulance, hospital, "poly1".to_string());
        let json = serde_json::to_value(&result).unwrap();

        assert!(result.is_success());
        assert_eq!(json["status"], "SUCCESS");
        assert_eq!(json["routePolyline"], "poly1");
        assert_eq!(json["assignedAmbulance"]["id"], 1);
        assert_eq!(json["assignedHospital"]["id"], 2);
        assert!(json.get("failureReason").is_none());
    }

    #[test]
    fn test_from_error() {
        let error = DispatchError::ReservationFailed { ambulance_id: 4 };
        let result = DispatchResult::from(&error);
        assert_eq!(result.status, DispatchStatus::Failure);
        assert_eq!(
            result.failure_reason.as_deref(),
            Some("failed to update ambulance availability")
        );
    }
}
