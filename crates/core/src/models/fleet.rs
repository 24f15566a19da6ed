use serde::{Deserialize, Serialize};

use super::emergency::GeoPoint;

/// 医院目录服务返回的医院信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "speciality")]
    pub specialization: String,
    #[serde(default)]
    pub ambulance_ids: Vec<i64>,
}

/// 救护车注册服务中的救护车
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ambulance {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub available: bool,
}

impl Ambulance {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// 候选救护车：仅在一次调度过程中存在，不做持久化
#[derive(Debug, Clone, Copy)]
pub struct AmbulanceHospitalCandidate<'a> {
    pub ambulance: &'a Ambulance,
    pub hospital: &'a Hospital,
}

impl<'a> AmbulanceHospitalCandidate<'a> {
    pub fn new(ambulance: &'a Ambulance, hospital: &'a Hospital) -> Self {
        Self {
            ambulance,
            hospital,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hospital_accepts_speciality_alias() {
        let hospital: Hospital = serde_json::from_str(
            r#"{"id": 1, "name": "Mount Sinai", "speciality": "Cardiology", "ambulanceIds": [3, 4]}"#,
        )
        .unwrap();
        assert_eq!(hospital.specialization, "Cardiology");
        assert_eq!(hospital.ambulance_ids, vec![3, 4]);
    }

    #[test]
    fn test_hospital_defaults_missing_ambulance_ids() {
        let hospital: Hospital =
            serde_json::from_str(r#"{"id": 2, "name": "Bellevue", "specialization": "Trauma"}"#)
                .unwrap();
        assert!(hospital.ambulance_ids.is_empty());
    }

    #[test]
    fn test_ambulance_deserialization() {
        let ambulance: Ambulance = serde_json::from_str(
            r#"{"id": 9, "latitude": 40.7128, "longitude": -74.006, "available": true, "name": "A-9"}"#,
        )
        .unwrap();
        assert!(ambulance.available);
        assert_eq!(ambulance.location(), GeoPoint::new(40.7128, -74.006));
    }
}
