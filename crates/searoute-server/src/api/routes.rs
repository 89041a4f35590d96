//! REST API routes.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use searoute_core::{
    areas_near, nearest_port, DepthSample, Navigability, Proximity, ProximityRadii,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::request_id::RequestId;
use crate::route_planner::{plan_route, LatLon, PlanError, RoutePlanRequest, RoutePlanResponse};
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/v1/routes/plan", post(plan_route_handler))
        .route("/v1/depth", get(depth_handler))
        .route("/v1/ports/nearest", get(nearest_port_handler))
        .route("/v1/protected-areas/nearby", get(protected_areas_handler))
}

// === Request/Response types ===

#[derive(Debug, Deserialize)]
pub struct DepthQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct DepthResponse {
    pub ok: bool,
    pub lat: f64,
    pub lon: f64,
    pub depth: DepthSample,
    pub navigable: bool,
    pub min_depth_m: f64,
    pub degraded: bool,
}

#[derive(Debug, Deserialize)]
pub struct NearestPortQuery {
    pub lat: f64,
    pub lon: f64,
    /// Restrict the search to one governorate.
    pub region: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProtectedAreaQuery {
    pub lat: f64,
    pub lon: f64,
    pub near_km: Option<f64>,
    pub inside_km: Option<f64>,
}

fn bad_request(errors: Vec<String>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "ok": false, "errors": errors })),
    )
}

// === Handlers ===

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let field = state.planner().field();
    Json(json!({
        "status": "ok",
        "started_at": state.started_at(),
        "dataset": {
            "degraded": field.is_degraded(),
            "source": field.source().map(|p| p.display().to_string()),
            "load_error": field.load_error(),
            "bounds": field.bounds(),
        },
    }))
}

async fn plan_route_handler(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<RoutePlanRequest>,
) -> impl IntoResponse {
    let request_id = request_id.map(|Extension(id)| id.to_string());
    match plan_route(state.as_ref(), request).await {
        Ok(summary) => (StatusCode::OK, Json(RoutePlanResponse::planned(summary))),
        Err(err) => {
            let status = match err {
                PlanError::InvalidRequest(_) => {
                    tracing::debug!(request_id = ?request_id, "Rejected plan request: {}", err);
                    StatusCode::BAD_REQUEST
                }
                PlanError::TaskFailed(_) => {
                    tracing::error!(request_id = ?request_id, "{}", err);
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (status, Json(RoutePlanResponse::failed(&err)))
        }
    }
}

async fn depth_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DepthQuery>,
) -> Result<Json<DepthResponse>, (StatusCode, Json<serde_json::Value>)> {
    let coord = LatLon {
        lat: query.lat,
        lon: query.lon,
    }
    .to_coordinate()
    .map_err(|err| bad_request(vec![err.to_string()]))?;

    let planner = state.planner();
    let min_depth_m = planner.config().min_depth_m;
    let nav = Navigability::new(planner.field(), min_depth_m);
    let depth = nav.depth_at(coord);
    Ok(Json(DepthResponse {
        ok: true,
        lat: coord.lat(),
        lon: coord.lon(),
        depth,
        navigable: nav.is_navigable_depth(depth),
        min_depth_m,
        degraded: planner.field().is_degraded(),
    }))
}

async fn nearest_port_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearestPortQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let coord = LatLon {
        lat: query.lat,
        lon: query.lon,
    }
    .to_coordinate()
    .map_err(|err| bad_request(vec![err.to_string()]))?;

    let region = query.region.as_deref().filter(|r| !r.trim().is_empty());
    match nearest_port(state.ports(), coord, region) {
        Some((port, distance_km)) => Ok((
            StatusCode::OK,
            Json(json!({
                "ok": true,
                "port": port,
                "distance_km": distance_km,
                "checked_at": Utc::now(),
            })),
        )),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({
                "ok": false,
                "errors": [format!("no port found for region {:?}", region.unwrap_or("any"))],
            })),
        )),
    }
}

async fn protected_areas_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProtectedAreaQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let coord = LatLon {
        lat: query.lat,
        lon: query.lon,
    }
    .to_coordinate()
    .map_err(|err| bad_request(vec![err.to_string()]))?;

    let defaults = ProximityRadii::default();
    let radii = ProximityRadii {
        inside_km: query.inside_km.unwrap_or(defaults.inside_km),
        near_km: query.near_km.unwrap_or(defaults.near_km),
    };
    radii
        .validate()
        .map_err(|err| bad_request(vec![err.to_string()]))?;

    let areas = areas_near(state.protected_areas(), coord, radii);
    Ok(Json(json!({
        "ok": true,
        "inside": areas.iter().any(|a| a.proximity == Proximity::Inside),
        "areas": areas,
    })))
}
