use async_trait::async_trait;
use dispatch_core::AmbulanceRegistry;
use serde_json::json;
use tracing::{error, info};

use super::normalize_base_url;

/// 救护车注册服务的HTTP客户端
pub struct HttpAmbulanceRegistry {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpAmbulanceRegistry {
    pub fn new(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            http_client,
        }
    }
}

#[async_trait]
impl AmbulanceRegistry for HttpAmbulanceRegistry {
    async fn set_availability(&self, ambulance_id: i64, available: bool) -> bool {
        let url = format!("{}/ambulances/{ambulance_id}/availability", self.base_url);

        match self
            .http_client
            .put(&url)
            .json(&json!({ "available": available }))
            .send()
            .await
        {
            Ok(response) => {
                if response.status().is_success() {
                    info!(
                        ambulance_id = ambulance_id,
                        available = available,
                        "Updated ambulance availability"
                    );
                    true
                } else {
                    error!(
                        ambulance_id = ambulance_id,
                        status = %response.status(),
                        "Ambulance registry rejected availability update"
                    );
                    false
                }
            }
            Err(e) => {
                error!(
                    ambulance_id = ambulance_id,
                    error = %e,
                    "Error updating availability for ambulance"
                );
                false
            }
        }
    }
}
