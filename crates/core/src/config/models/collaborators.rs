use serde::{Deserialize, Serialize};

/// 外部协作服务地址配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorsConfig {
    pub hospital_directory_url: String,
    pub ambulance_registry_url: String,
    pub route_provider_url: String,
    pub request_timeout_seconds: u64,
}

impl Default for CollaboratorsConfig {
    fn default() -> Self {
        Self {
            hospital_directory_url: "http://localhost:8888/hospital-management-service"
                .to_string(),
            ambulance_registry_url: "http://localhost:8888/ambulance-service".to_string(),
            route_provider_url: "http://localhost:8888/route-optimization-service".to_string(),
            request_timeout_seconds: 5,
        }
    }
}

impl CollaboratorsConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("hospital_directory_url", &self.hospital_directory_url),
            ("ambulance_registry_url", &self.ambulance_registry_url),
            ("route_provider_url", &self.route_provider_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow::anyhow!("{name} 必须是HTTP(S)地址: {url}"));
            }
        }

        if self.request_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("协作服务请求超时时间必须大于0"));
        }

        Ok(())
    }
}
