use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use huntcast::{
    engine::{Forecaster, PredictionEngine},
    weather::{StaticWeather, WeatherObservation},
    web,
};

fn app() -> Router {
    let weather = StaticWeather(WeatherObservation {
        temperature: 48.0,
        wind_speed: 5.0,
        precipitation: 0.0,
        pressure: 30.02,
    });
    let forecaster = Forecaster::new(PredictionEngine::default(), weather, Duration::from_secs(1));
    web::router(Arc::new(forecaster))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn elk_country(species: Option<Vec<&str>>) -> Value {
    json!({
        "bounds": { "north": 39.01, "south": 39.0, "east": -105.99, "west": -106.0 },
        "terrain": {
            "elevation": 7200,
            "cover_density": 0.7,
            "water_sources": [{ "lat": 39.005, "lon": -105.995 }]
        },
        "species": species,
        "at": "2024-10-15T06:30:00"
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn species_lists_three_profiles() {
    let (status, body) = send(Request::get("/api/species").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["species"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["elk", "mule_deer", "turkey"]);
    assert_eq!(body[0]["profile"]["time_weights"]["dawn"], json!(1.0));
}

#[tokio::test]
async fn predictions_are_ranked_json() {
    let (status, body) = send(post_json("/api/predictions", elk_country(None))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["season"], json!("FALL"));
    assert_eq!(body["weather_available"], json!(true));

    let predictions = body["predictions"].as_array().unwrap();
    assert!(!predictions.is_empty());
    let probabilities: Vec<f64> = predictions
        .iter()
        .map(|p| p["probability"].as_f64().unwrap())
        .collect();
    assert!(probabilities.windows(2).all(|pair| pair[0] >= pair[1]));
    assert!(predictions[0]["factors"]["terrain"].is_number());
    assert!(predictions[0]["preferred_food"].is_array());
}

#[tokio::test]
async fn unknown_species_is_bad_request() {
    let (status, body) = send(post_json(
        "/api/predictions",
        elk_country(Some(vec!["elk", "bison"])),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("bison"));
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (status, _) = send(post_json("/api/predictions", json!({ "bounds": 3 }))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn outlook_ranks_hours_per_species() {
    let (status, body) = send(post_json(
        "/api/outlook",
        json!({ "lat": 39.0, "lon": -106.0, "species": ["turkey"], "at": "2024-04-20T12:00:00" }),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    let outlooks = body.as_array().unwrap();
    assert_eq!(outlooks.len(), 1);
    assert_eq!(outlooks[0]["species"], json!("turkey"));
    assert_eq!(outlooks[0]["hours"].as_array().unwrap().len(), 24);
    let best = outlooks[0]["optimal_hours"].as_array().unwrap();
    assert!(!best.is_empty() && best.len() <= 3);
    assert_eq!(best[0]["bucket"], json!("DAWN"));
}
