use std::time::Duration;

use dispatch_core::{
    AmbulanceRegistry, DispatchError, GeoPoint, HospitalDirectory, RouteProvider, RouteStatus,
};
use dispatch_infrastructure::http::{
    build_http_client, HttpAmbulanceRegistry, HttpHospitalDirectory, HttpRouteProvider,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_client() -> reqwest::Client {
    build_http_client(Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn test_find_by_specialization_sends_speciality_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hospitals"))
        .and(query_param("speciality", "Cardiology"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Mount Sinai", "specialization": "Cardiology", "ambulanceIds": [10, 11]},
            {"id": 2, "name": "NYU Langone", "speciality": "Cardiology"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let directory = HttpHospitalDirectory::new(server.uri(), http_client());
    let hospitals = directory.find_by_specialization("Cardiology").await.unwrap();

    assert_eq!(hospitals.len(), 2);
    assert_eq!(hospitals[0].ambulance_ids, vec![10, 11]);
    assert_eq!(hospitals[1].specialization, "Cardiology");
}

#[tokio::test]
async fn test_find_by_specialization_empty_is_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hospitals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let directory = HttpHospitalDirectory::new(server.uri(), http_client());
    let hospitals = directory.find_by_specialization("Oncology").await.unwrap();
    assert!(hospitals.is_empty());
}

#[tokio::test]
async fn test_find_by_specialization_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hospitals"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let directory = HttpHospitalDirectory::new(server.uri(), http_client());
    let result = directory.find_by_specialization("Cardiology").await;
    assert!(matches!(
        result,
        Err(DispatchError::CollaboratorUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_find_ambulances_malformed_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hospitals/by-hospital/7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let directory = HttpHospitalDirectory::new(server.uri(), http_client());
    let result = directory.find_ambulances(7).await;
    assert!(matches!(
        result,
        Err(DispatchError::CollaboratorUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_find_ambulances_with_trailing_slash_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hospitals/by-hospital/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 10, "latitude": 40.7128, "longitude": -74.006, "available": true},
            {"id": 11, "latitude": 40.73, "longitude": -73.99, "available": false}
        ])))
        .mount(&server)
        .await;

    let directory = HttpHospitalDirectory::new(format!("{}/", server.uri()), http_client());
    let ambulances = directory.find_ambulances(3).await.unwrap();

    assert_eq!(ambulances.len(), 2);
    assert!(ambulances[0].available);
    assert!(!ambulances[1].available);
}

#[tokio::test]
async fn test_hospital_directory_unreachable() {
    // Nothing listens on this port once the server is dropped
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let directory = HttpHospitalDirectory::new(uri, http_client());
    let result = directory.find_by_specialization("Cardiology").await;
    assert!(matches!(
        result,
        Err(DispatchError::CollaboratorUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_compute_route_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes"))
        .and(query_param("originLat", "40.7128"))
        .and(query_param("originLng", "-74.006"))
        .and(query_param("destLat", "40.7589"))
        .and(query_param("destLng", "-73.9851"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "SUCCESS",
            "geometry": "poly1",
            "distance": 5400.0,
            "duration": 720.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = HttpRouteProvider::new(server.uri(), http_client());
    let route = provider
        .compute_route(
            GeoPoint::new(40.7128, -74.006),
            GeoPoint::new(40.7589, -73.9851),
        )
        .await;

    assert!(route.is_success());
    assert_eq!(route.polyline_geometry.as_deref(), Some("poly1"));
    assert_eq!(route.distance_meters, 5400.0);
    assert_eq!(route.duration_seconds, 720.0);
}

#[tokio::test]
async fn test_compute_route_provider_failure_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "FAILURE",
            "polyline": null
        })))
        .mount(&server)
        .await;

    let provider = HttpRouteProvider::new(server.uri(), http_client());
    let route = provider
        .compute_route(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0))
        .await;

    assert_eq!(route.status, RouteStatus::Failure);
}

#[tokio::test]
async fn test_compute_route_http_error_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = HttpRouteProvider::new(server.uri(), http_client());
    let route = provider
        .compute_route(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0))
        .await;

    assert!(!route.is_success());
}

#[tokio::test]
async fn test_compute_route_success_without_geometry_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "SUCCESS"})))
        .mount(&server)
        .await;

    let provider = HttpRouteProvider::new(server.uri(), http_client());
    let route = provider
        .compute_route(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0))
        .await;

    assert_eq!(route.status, RouteStatus::Failure);
}

#[tokio::test]
async fn test_compute_route_timeout_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "SUCCESS", "geometry": "late"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = build_http_client(Duration::from_millis(100)).unwrap();
    let provider = HttpRouteProvider::new(server.uri(), client);
    let route = provider
        .compute_route(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0))
        .await;

    assert!(!route.is_success());
}

#[tokio::test]
async fn test_set_availability_sends_put_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/ambulances/42/availability"))
        .and(body_json(json!({"available": false})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let registry = HttpAmbulanceRegistry::new(server.uri(), http_client());
    assert!(registry.set_availability(42, false).await);
}

#[tokio::test]
async fn test_set_availability_error_status_returns_false() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/ambulances/42/availability"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let registry = HttpAmbulanceRegistry::new(server.uri(), http_client());
    assert!(!registry.set_availability(42, false).await);
}
