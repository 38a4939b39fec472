//! Integration tests for the trip estimator HTTP API

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use trip_estimator::{AirportTable, TripEstimatorConfig, TripPlanner, web};

fn app() -> Router {
    let config = TripEstimatorConfig::default();
    let planner = TripPlanner::from_config(&config, Arc::new(AirportTable::builtin()));
    web::app(&config, planner)
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(uri: &str, payload: Value) -> (StatusCode, Value) {
    send(
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_distance() {
    let (status, body) =
        get("/api/distance?from_lat=-6.2088&from_lon=106.8456&to_lat=-8.7462&to_lon=115.1669")
            .await;
    assert_eq!(status, StatusCode::OK);
    let d = body["distanceKm"].as_f64().unwrap();
    assert!((d - 960.0).abs() < 5.0, "got {d}");
}

#[tokio::test]
async fn test_distance_rejects_out_of_range() {
    let (status, body) = get("/api/distance?from_lat=95&from_lon=0&to_lat=0&to_lon=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_coordinate");
}

#[tokio::test]
async fn test_nearest_airport() {
    let (status, body) = get("/api/airports/nearest?lat=-6.2088&lon=106.8456").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "CGK");
}

#[tokio::test]
async fn test_estimate() {
    let (status, body) = post(
        "/api/estimate",
        json!({
            "origin": { "lat": -6.2088, "lng": 106.8456 },
            "destination": { "lat": -8.7462, "lng": 115.1669 },
            "startDate": "2024-01-01",
            "endDate": "2024-01-02",
            "adults": 2,
            "children": 0,
            "pricePerDay": 150000.0
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["durationDays"], 2);
    assert_eq!(body["totalCost"].as_f64().unwrap(), 600_000.0);
    assert_eq!(body["flightIncluded"], false);
}

#[tokio::test]
async fn test_estimate_rejects_reversed_dates() {
    let (status, body) = post(
        "/api/estimate",
        json!({
            "origin": { "lat": -6.2088, "lng": 106.8456 },
            "destination": { "lat": -8.7462, "lng": 115.1669 },
            "startDate": "2024-01-02",
            "endDate": "2024-01-01",
            "adults": 1,
            "pricePerDay": 150000.0
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_date_range");
}

#[tokio::test]
async fn test_flight_estimate() {
    let (status, body) = post(
        "/api/flight/estimate",
        json!({
            "origin": { "latitude": -6.2088, "longitude": 106.8456 },
            "destination": { "latitude": -8.7462, "longitude": 115.1669 }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flight"]["route"]["origin"]["code"], "CGK");
    assert_eq!(body["flight"]["route"]["destination"]["code"], "DPS");
    assert_eq!(body["flight"]["source"], "formula");
}

#[tokio::test]
async fn test_plan_short_trip_has_no_flight() {
    let (status, body) = post(
        "/api/plan",
        json!({
            "origin": { "lat": -6.2088, "lng": 106.8456 },
            "destination": { "lat": -6.9175, "lng": 107.6191 },
            "startDate": "2024-01-01",
            "endDate": "2024-01-03",
            "includeFlight": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["context"]["flight"].is_null());
    assert_eq!(body["estimate"]["flightIncluded"], false);
    assert_eq!(body["estimate"]["totalCost"].as_f64().unwrap(), 450_000.0);
}

#[tokio::test]
async fn test_weather_condition() {
    let (status, body) = get("/api/weather/condition/95").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["condition"], "thunderstorm");
    assert_eq!(body["label"], "Badai Petir");
}

#[tokio::test]
async fn test_normalize_places() {
    let (status, body) = post(
        "/api/places/normalize",
        json!([
            {
                "title": "Pantai Kuta",
                "gps_coordinates": { "latitude": -8.7184, "longitude": 115.1686 },
                "serpapi_thumbnail": "https://serpapi.com/kuta.jpg"
            },
            {
                "name": "Monas",
                "location": { "lat": -6.1754, "lng": 106.8272 },
                "photo": "https://example.com/monas.jpg",
                "price": 20000
            }
        ]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Pantai Kuta");
    assert_eq!(body[0]["thumbnail"], "https://serpapi.com/kuta.jpg");
    assert_eq!(body[1]["coordinate"]["latitude"], -6.1754);
    assert_eq!(body[1]["pricePerDay"].as_f64().unwrap(), 20000.0);
}

#[tokio::test]
async fn test_normalize_places_rejects_nameless() {
    let (status, body) = post("/api/places/normalize", json!({ "address": "Jl. Contoh" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
async fn test_estimate_rejects_malformed_date() {
    let (status, body) = post(
        "/api/estimate",
        json!({
            "origin": { "lat": -6.2088, "lng": 106.8456 },
            "destination": { "lat": -8.7462, "lng": 115.1669 },
            "startDate": "01/02/2024",
            "endDate": "2024-01-03",
            "pricePerDay": 150000.0
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
    assert!(body["message"].as_str().unwrap().contains("startDate"));
}

#[tokio::test]
async fn test_plan_rejects_body_without_json_content_type() {
    let (status, body) = send(
        Request::post("/api/plan")
            .body(Body::from("{}"))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
async fn test_distance_rejects_non_numeric_query() {
    let (status, body) = get("/api/distance?from_lat=abc&from_lon=0&to_lat=0&to_lon=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_nearest_airport_rejects_missing_query() {
    let (status, body) = get("/api/airports/nearest?lat=-6.2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
async fn test_weather_condition_rejects_bad_code() {
    let (status, body) = get("/api/weather/condition/300").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}
