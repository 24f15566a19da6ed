use async_trait::async_trait;
use dispatch_core::{GeoPoint, RouteProvider, RouteResult};
use tracing::{debug, warn};

use super::normalize_base_url;

/// 路线规划服务的HTTP客户端
///
/// 任何失败都返回 `RouteResult::failure()`，不向调用方抛出错误。
pub struct HttpRouteProvider {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpRouteProvider {
    pub fn new(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            http_client,
        }
    }
}

#[async_trait]
impl RouteProvider for HttpRouteProvider {
    async fn compute_route(&self, origin: GeoPoint, destination: GeoPoint) -> RouteResult {
        let url = format!("{}/routes", self.base_url);
        let request = self.http_client.get(&url).query(&[
            ("originLat", origin.latitude),
            ("originLng", origin.longitude),
            ("destLat", destination.latitude),
            ("destLng", destination.longitude),
        ]);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Error requesting route from provider");
                return RouteResult::failure();
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "Route provider returned error status");
            return RouteResult::failure();
        }

        match response.json::<RouteResult>().await {
            Ok(route) => {
                let route = route.normalized();
                debug!(
                    status = ?route.status,
                    distance_meters = route.distance_meters,
                    duration_seconds = route.duration_seconds,
                    "Received route from provider"
                );
                route
            }
            Err(e) => {
                warn!(error = %e, "Malformed route provider payload");
                RouteResult::failure()
            }
        }
    }
}
