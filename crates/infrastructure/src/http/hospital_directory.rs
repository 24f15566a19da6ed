use async_trait::async_trait;
use dispatch_core::{
    Ambulance, Collaborator, CoordinatorResult, DispatchError, Hospital, HospitalDirectory,
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::normalize_base_url;

/// 医院目录服务的HTTP客户端
pub struct HttpHospitalDirectory {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpHospitalDirectory {
    pub fn new(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            http_client,
        }
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> CoordinatorResult<Vec<T>> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Request to hospital directory failed while fetching {}", what);
            DispatchError::collaborator(Collaborator::HospitalDirectory, format!("请求失败: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Hospital directory returned error status while fetching {}", what);
            return Err(DispatchError::collaborator(
                Collaborator::HospitalDirectory,
                format!("非成功状态码: {status}"),
            ));
        }

        response.json::<Vec<T>>().await.map_err(|e| {
            warn!(error = %e, "Malformed hospital directory payload for {}", what);
            DispatchError::collaborator(Collaborator::HospitalDirectory, format!("响应解析失败: {e}"))
        })
    }
}

#[async_trait]
impl HospitalDirectory for HttpHospitalDirectory {
    async fn find_by_specialization(&self, specialization: &str) -> CoordinatorResult<Vec<Hospital>> {
        let url = format!("{}/hospitals", self.base_url);
        let request = self
            .http_client
            .get(&url)
            .query(&[("speciality", specialization)]);

        let hospitals: Vec<Hospital> = self.fetch_list(request, "hospitals").await?;
        debug!(
            specialization = specialization,
            count = hospitals.len(),
            "Fetched hospitals by specialization"
        );
        Ok(hospitals)
    }

    async fn find_ambulances(&self, hospital_id: i64) -> CoordinatorResult<Vec<Ambulance>> {
        let url = format!("{}/hospitals/by-hospital/{hospital_id}", self.base_url);
        let request = self.http_client.get(&url);

        let ambulances: Vec<Ambulance> = self.fetch_list(request, "ambulances").await?;
        debug!(
            hospital_id = hospital_id,
            count = ambulances.len(),
            "Fetched ambulances for hospital"
        );
        Ok(ambulances)
    }
}
