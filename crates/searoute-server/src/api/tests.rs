use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use searoute_core::{haversine_km, BathymetricField, BathymetryGrid, Coordinate, PlannerConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::{api, config::Config, state::AppState};

/// Gulf of Tunis stand-in: land west of lon 10.25, deep water east of it.
fn coastal_field() -> BathymetricField {
    let grid = BathymetryGrid::regular(36.5, 10.0, 0.05, 16, 20, |_, col| {
        if col < 5 {
            30.0
        } else {
            -45.0
        }
    })
    .expect("grid");
    BathymetricField::from_grid(grid)
}

fn setup_app_with_config(field: BathymetricField, config: Config) -> Router {
    let state = AppState::from_field(field, config).expect("state");
    api::app(Arc::new(state))
}

fn setup_app_with(field: BathymetricField) -> Router {
    setup_app_with_config(field, Config::default())
}

fn setup_app() -> Router {
    setup_app_with(coastal_field())
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn plan_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/routes/plan")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_dataset_state() {
    let app = setup_app();
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["dataset"]["degraded"], false);
    assert_eq!(body["dataset"]["bounds"]["min_lat"], 36.5);
}

#[tokio::test]
async fn plans_clean_route() {
    let app = setup_app();
    let res = app
        .oneshot(plan_request(json!({
            "start": {"lat": 36.6, "lon": 10.4},
            "end": {"lat": 37.1, "lon": 10.9}
        })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("x-request-id").is_some());
    let body = read_json(res).await;
    assert_eq!(body["ok"], true);
    assert!(body["planned_at"].is_string());
    let summary = &body["summary"];
    assert_eq!(summary["status"], "clean");
    assert_eq!(summary["waypoints"][0], json!({"lat": 36.6, "lon": 10.4}));
    assert!(summary["total_distance_km"].as_f64().unwrap() > 60.0);
    assert_eq!(summary["segments"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn land_start_is_substituted() {
    let app = setup_app();
    let res = app
        .oneshot(plan_request(json!({
            "start": {"lat": 36.8, "lon": 10.2},
            "end": {"lat": 36.8, "lon": 10.8}
        })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    let summary = &body["summary"];
    assert_eq!(summary["status"], "substituted_endpoint");
    assert_eq!(summary["start"]["substituted"], true);
    assert_eq!(summary["start"]["requested"], json!({"lat": 36.8, "lon": 10.2}));
}

#[tokio::test]
async fn rejects_invalid_coordinates() {
    let app = setup_app();
    let res = app
        .oneshot(plan_request(json!({
            "start": {"lat": 95.0, "lon": 10.4},
            "end": {"lat": 37.1, "lon": 10.9}
        })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert_eq!(body["ok"], false);
    assert!(body["errors"][0].as_str().unwrap().contains("invalid coordinate"));
    assert!(body.get("summary").is_none());
}

#[tokio::test]
async fn rejects_negative_min_depth() {
    let app = setup_app();
    let res = app
        .oneshot(plan_request(json!({
            "start": {"lat": 36.6, "lon": 10.4},
            "end": {"lat": 37.1, "lon": 10.9},
            "min_depth_m": -4.0
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn degraded_dataset_returns_flagged_straight_line() {
    let app = setup_app_with(BathymetricField::unavailable("dataset missing"));
    let res = app
        .oneshot(plan_request(json!({
            "start": {"lat": 34.0, "lon": 11.5},
            "end": {"lat": 34.4, "lon": 11.5}
        })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    let summary = &body["summary"];
    assert_eq!(summary["status"], "degraded_straight_line");
    assert_eq!(summary["waypoints"].as_array().unwrap().len(), 11);
    assert_eq!(summary["warnings"][0]["kind"], "data_unavailable");
    assert!(summary["search_cost"].is_null());

    let direct = haversine_km(
        Coordinate::new(34.0, 11.5).unwrap(),
        Coordinate::new(34.4, 11.5).unwrap(),
    );
    let distance = summary["total_distance_km"].as_f64().unwrap();
    assert!((distance - direct).abs() < 1e-6);
    assert_eq!(summary["start"]["substituted"], false);
}

#[tokio::test]
async fn degraded_dataset_snaps_to_ports_when_enabled() {
    let config = Config {
        port_fallback: true,
        ..Config::default()
    };
    let app = setup_app_with_config(BathymetricField::unavailable("dataset missing"), config);
    let res = app
        .oneshot(plan_request(json!({
            "start": {"lat": 35.83, "lon": 10.64},
            "end": {"lat": 35.3, "lon": 12.0}
        })))
        .await
        .unwrap();

    let body = read_json(res).await;
    let summary = &body["summary"];
    assert_eq!(summary["status"], "degraded_straight_line");
    assert_eq!(summary["start"]["substituted"], true);
    assert_eq!(summary["end"]["substituted"], false);
    assert_eq!(summary["waypoints"].as_array().unwrap().len(), 11);
}

#[tokio::test]
async fn protected_area_proximity() {
    let app = setup_app();
    let req = Request::builder()
        .uri("/v1/protected-areas/nearby?lat=37.1&lon=10.8")
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["inside"], true);
    assert_eq!(body["areas"][0]["area"]["name"], "Iles Zembra et Zembretta");
    assert_eq!(body["areas"][0]["proximity"], "inside");

    let req = Request::builder()
        .uri("/v1/protected-areas/nearby?lat=37.0&lon=10.8&near_km=15")
        .body(Body::empty())
        .unwrap();
    let body = read_json(app.clone().oneshot(req).await.unwrap()).await;
    assert_eq!(body["inside"], false);
    assert_eq!(body["areas"][0]["proximity"], "near");

    let req = Request::builder()
        .uri("/v1/protected-areas/nearby?lat=36.0&lon=12.5")
        .body(Body::empty())
        .unwrap();
    let body = read_json(app.clone().oneshot(req).await.unwrap()).await;
    assert_eq!(body["areas"], json!([]));

    let req = Request::builder()
        .uri("/v1/protected-areas/nearby?lat=37.1&lon=10.8&inside_km=20&near_km=5")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn depth_lookup() {
    let app = setup_app();
    let req = Request::builder()
        .uri("/v1/depth?lat=36.7&lon=10.6")
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["depth"], json!({"kind": "known", "depth_m": 45.0}));
    assert_eq!(body["navigable"], true);
    assert_eq!(body["degraded"], false);

    let req = Request::builder()
        .uri("/v1/depth?lat=10.0&lon=10.6")
        .body(Body::empty())
        .unwrap();
    let body = read_json(app.clone().oneshot(req).await.unwrap()).await;
    assert_eq!(body["depth"]["kind"], "unknown");
    assert_eq!(body["navigable"], false);

    let req = Request::builder()
        .uri("/v1/depth?lat=-91&lon=10.6")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn nearest_port_lookup() {
    let app = setup_app();
    let req = Request::builder()
        .uri("/v1/ports/nearest?lat=34.74&lon=10.78")
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["port"]["name"], "Port de Sfax");
    assert!(body["distance_km"].as_f64().unwrap() < 5.0);

    let req = Request::builder()
        .uri("/v1/ports/nearest?lat=34.74&lon=10.78&region=Nowhere")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn request_id_is_propagated() {
    let app = setup_app();
    let req = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-42")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.headers().get("x-request-id").unwrap(), "trace-42");
}

#[test]
fn planner_config_follows_server_config() {
    let config = Config {
        min_depth_m: 7.5,
        ..Config::default()
    };
    assert_eq!(
        config.planner_config(),
        PlannerConfig::default().with_min_depth(7.5)
    );
}
