//! Integration tests for the charging API adapter
//!
//! Drives the real HTTP client against a wiremock backend and asserts on
//! the port-level types the application layer consumes.

#![allow(clippy::expect_used)]

use application::ports::RoutingPort;
use domain::TripRequest;
use infrastructure::ChargingApiAdapter;
use integration_charging::{ChargingApiConfig, HttpChargingClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn adapter_for(server: &MockServer) -> ChargingApiAdapter {
    let config = ChargingApiConfig {
        base_url: server.uri(),
        timeout_secs: 5,
    };
    let client = HttpChargingClient::new(&config).expect("client");
    ChargingApiAdapter::new(client)
}

#[tokio::test]
async fn catalog_arrives_as_vehicle_summaries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "vehicles": [
                    { "id": "5f043aa8bc262f1627fc032b", "naming": { "make": "Tesla", "model": "Model 3" } }
                ]
            }"#,
        ))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server);
    let vehicles = adapter.list_vehicles().await.expect("catalog");

    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].display_name(), "Tesla Model 3");
}

#[tokio::test]
async fn route_answer_arrives_as_domain_geometry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/route"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "route": [[48.8566, 2.3522], [45.764, 4.8357]],
                "stations": [
                    { "lat": 46.3, "lon": 4.8, "name": "Ionity Mâcon", "address": "Aire de Mâcon, A6" }
                ],
                "startPoint": { "lat": 48.8566, "lon": 2.3522, "name": "Paris" },
                "endPoint": { "lat": 45.764, "lon": 4.8357, "name": "Lyon" },
                "distance": 465.2,
                "time": 4.5,
                "price": 18.3,
                "nb_stations": 2
            }"#,
        ))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server);
    let request = TripRequest::new("5f043aa8bc262f1627fc032b", "Paris", "Lyon").expect("request");
    let plan = adapter.compute_route(&request).await.expect("plan");

    assert!(plan.has_geometry());
    assert_eq!(plan.distance_km, Some(465.2));

    let stations = plan.stations.expect("stations");
    assert!(stations[0].position().is_some());
    assert_eq!(stations[0].address.as_deref(), Some("Aire de Mâcon, A6"));

    let start = plan.start_point.expect("start");
    assert_eq!(start.name.as_deref(), Some("Paris"));
    assert!(start.position().is_some());
}

#[tokio::test]
async fn rejected_route_surfaces_as_external_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/route"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"error": "Impossible de calculer un itinéraire"}"#),
        )
        .mount(&server)
        .await;

    let adapter = adapter_for(&server);
    let request = TripRequest::new("5f043aa8bc262f1627fc032b", "Paris", "Lyon").expect("request");
    let err = adapter.compute_route(&request).await.expect_err("rejected");

    let message = err.to_string();
    assert!(message.contains("Route computation failed"));
    assert!(message.contains("Paris"));
    assert!(message.contains("Lyon"));
}

#[tokio::test]
async fn availability_follows_backend_health() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"vehicles": []}"#))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server);
    assert!(adapter.is_available().await);
}
