//! Route planning API smoke tests against a running server.
//!
//! Run with: cargo test --test route_api_test -- --ignored

use reqwest::Client;

fn base_url() -> String {
    std::env::var("SEAROUTE_TEST_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Plan a coastal route from La Goulette to Kelibia.
#[tokio::test]
#[ignore]
async fn test_plan_route() {
    let client = Client::new();
    let base = base_url();

    let resp = client
        .post(format!("{}/v1/routes/plan", base))
        .json(&serde_json::json!({
            "start": {"lat": 36.8333, "lon": 10.3167},
            "end": {"lat": 36.8444, "lon": 11.0889}
        }))
        .send()
        .await
        .expect("Failed to plan route");

    assert!(resp.status().is_success(), "Should plan route successfully");
    assert!(resp.headers().get("x-request-id").is_some());
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);

    let summary = &body["summary"];
    let waypoints = summary["waypoints"].as_array().expect("waypoints");
    assert!(!waypoints.is_empty());
    assert!(summary["total_distance_km"].as_f64().unwrap() > 0.0);
    assert!(summary["status"].is_string());
}

/// Out-of-range coordinates are rejected before planning.
#[tokio::test]
#[ignore]
async fn test_plan_route_rejects_invalid_coordinates() {
    let client = Client::new();
    let base = base_url();

    let resp = client
        .post(format!("{}/v1/routes/plan", base))
        .json(&serde_json::json!({
            "start": {"lat": 123.0, "lon": 10.3},
            "end": {"lat": 36.8, "lon": 11.0}
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], false);
}

/// Health endpoint reports whether depth data is loaded.
#[tokio::test]
#[ignore]
async fn test_health_and_depth() {
    let client = Client::new();
    let base = base_url();

    let health: serde_json::Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");
    assert!(health["dataset"]["degraded"].is_boolean());

    let resp = client
        .get(format!("{}/v1/depth?lat=37.0&lon=10.5", base))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let depth: serde_json::Value = resp.json().await.unwrap();
    assert!(depth["navigable"].is_boolean());
}
