mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use fake::{Fake, faker::name::en::Name};
use pretty_assertions::assert_eq;
use salonbook_api::{build_router, middleware::scope::ESTABLISHMENT_HEADER};
use serde_json::{Value, json};

fn server() -> TestServer {
    TestServer::new(build_router(common::offline_state(), None, 5)).unwrap()
}

fn scope_header(value: &'static str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(ESTABLISHMENT_HEADER),
        HeaderValue::from_static(value),
    )
}

#[tokio::test]
async fn test_health_and_version() {
    let server = server();

    let health = server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>(), json!({ "status": "ok" }));

    let version = server.get("/version").await;
    version.assert_status_ok();
    assert_eq!(version.json::<Value>()["name"], "salonbook-api");
}

#[tokio::test]
async fn test_scoped_route_without_header_is_unauthorized() {
    let response = server().get("/api/services").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains(ESTABLISHMENT_HEADER));
}

#[tokio::test]
async fn test_malformed_scope_header_is_rejected() {
    let (name, value) = scope_header("salon-42");
    let response = server()
        .get("/api/appointments")
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_establishment_name_is_rejected() {
    let response = server()
        .post("/api/establishments")
        .json(&json!({ "name": "   ", "timezone": "America/Sao_Paulo" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_timezone_is_rejected() {
    let name: String = Name().fake();
    let response = server()
        .post("/api/establishments")
        .json(&json!({ "name": name, "timezone": "Mars/Olympus_Mons" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_public_booking_requires_customer_phone() {
    let response = server()
        .post("/api/public/establishments/6f1c1f9e-4d8b-4a8e-9f4c-2f1d8f0a7b11/bookings")
        .json(&json!({
            "service_id": "0b9f2d8e-1f0a-4c55-8f55-7b1c9f0e2a33",
            "start_time": "2030-01-07T12:00:00Z",
            "customer_name": "Marta",
            "customer_phone": ""
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
