use serde::{Deserialize, Serialize};

use crate::errors::{CoordinatorResult, DispatchError};

/// 经纬度坐标（单位：度）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// 坐标是否为有限值且处于合法范围
    pub fn validate(&self) -> CoordinatorResult<()> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(DispatchError::Validation(
                "coordinates must be finite numbers".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(DispatchError::Validation(format!(
                "latitude {} out of range [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(DispatchError::Validation(format!(
                "longitude {} out of range [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// 紧急调度请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub specialization: String,
}

impl EmergencyRequest {
    /// 创建并校验请求，专科名称会去除首尾空白
    pub fn new(
        latitude: f64,
        longitude: f64,
        specialization: impl Into<String>,
    ) -> CoordinatorResult<Self> {
        let request = Self {
            latitude,
            longitude,
            specialization: specialization.into().trim().to_string(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn validate(&self) -> CoordinatorResult<()> {
        self.location().validate()?;
        if self.specialization.trim().is_empty() {
            return Err(DispatchError::Validation(
                "specialization must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// HTTP入站请求体，字段缺失时在转换阶段报告验证错误
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmergencyRequestPayload {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub specialization: Option<String>,
}

impl TryFrom<EmergencyRequestPayload> for EmergencyRequest {
    type Error = DispatchError;

    fn try_from(payload: EmergencyRequestPayload) -> Result<Self, Self::Error> {
        let latitude = payload
            .latitude
            .ok_or_else(|| DispatchError::Validation("latitude is required".to_string()))?;
        let longitude = payload
            .longitude
            .ok_or_else(|| DispatchError::Validation("longitude is required".to_string()))?;
        let specialization = payload
            .specialization
            .ok_or_else(|| DispatchError::Validation("specialization is required".to_string()))?;

        EmergencyRequest::new(latitude, longitude, specialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_request_trims_specialization() {
        let request = EmergencyRequest::new(40.7589, -73.9851, "  Cardiology ").unwrap();
        assert_eq!(request.specialization, "Cardiology");
        assert_eq!(request.location(), GeoPoint::new(40.7589, -73.9851));
    }

    #[test]
    fn test_emergency_request_rejects_empty_specialization() {
        let result = EmergencyRequest::new(40.0, -73.0, "   ");
        assert!(matches!(result, Err(DispatchError::Validation(_))));
    }

    #[test]
    fn test_emergency_request_rejects_non_finite_coordinates() {
        assert!(EmergencyRequest::new(f64::NAN, -73.0, "Cardiology").is_err());
        assert!(EmergencyRequest::new(40.0, f64::INFINITY, "Cardiology").is_err());
    }

    #[test]
    fn test_emergency_request_rejects_out_of_range_coordinates() {
        assert!(EmergencyRequest::new(91.0, 0.0, "Cardiology").is_err());
        assert!(EmergencyRequest::new(0.0, -180.5, "Cardiology").is_err());
        assert!(EmergencyRequest::new(-90.0, 180.0, "Cardiology").is_ok());
    }

    #[test]
    fn test_payload_missing_fields() {
        let payload: EmergencyRequestPayload =
            serde_json::from_str(r#"{"latitude": 40.0, "specialization": "Cardiology"}"#).unwrap();
        let error = EmergencyRequest::try_from(payload).unwrap_err();
        assert!(error.to_string().contains("longitude is required"));
    }

    #[test]
    fn test_payload_conversion() {
        let payload: EmergencyRequestPayload = serde_json::from_str(
            r#"{"latitude": 40.7589, "longitude": -73.9851, "specialization": "Cardiology"}"#,
        )
        .unwrap();
        let request = EmergencyRequest::try_from(payload).unwrap();
        assert_eq!(request.specialization, "Cardiology");
    }
}
