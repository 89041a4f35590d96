//! Async orchestration of blocking route planning.

use chrono::{DateTime, Utc};
use searoute_core::{CancelToken, Coordinate, RouteSummary};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::AppState;

/// Unvalidated coordinate as sent by clients.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn to_coordinate(self) -> searoute_core::Result<Coordinate> {
        Coordinate::new(self.lat, self.lon)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutePlanRequest {
    pub start: LatLon,
    pub end: LatLon,
    /// Overrides the configured draft limit for this request.
    pub min_depth_m: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoutePlanResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RouteSummary>,
    pub errors: Vec<String>,
}

impl RoutePlanResponse {
    pub fn planned(summary: RouteSummary) -> Self {
        Self {
            ok: true,
            planned_at: Some(Utc::now()),
            summary: Some(summary),
            errors: Vec::new(),
        }
    }

    pub fn failed(error: &PlanError) -> Self {
        Self {
            ok: false,
            planned_at: None,
            summary: None,
            errors: vec![error.to_string()],
        }
    }
}

#[derive(Debug, Error)]
pub enum PlanError {
    /// Bad coordinates or parameter overrides.
    #[error(transparent)]
    InvalidRequest(#[from] searoute_core::Error),

    /// The blocking planning task panicked or was aborted.
    #[error("route planning task failed: {0}")]
    TaskFailed(String),
}

/// Plan a route on the blocking pool, cancelling it once the configured
/// deadline passes.
pub async fn plan_route(
    state: &AppState,
    request: RoutePlanRequest,
) -> Result<RouteSummary, PlanError> {
    let start = request.start.to_coordinate()?;
    let end = request.end.to_coordinate()?;
    let mut config = state.config().planner_config();
    if let Some(min_depth_m) = request.min_depth_m {
        config = config.with_min_depth(min_depth_m);
    }
    config.validate()?;

    let planner = state.planner().clone();
    let token = CancelToken::new();
    let deadline = state.config().plan_timeout;
    let timer = {
        let token = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            tracing::warn!("Route planning exceeded {:?}, cancelling", deadline);
            token.cancel();
        })
    };

    let result = tokio::task::spawn_blocking(move || {
        planner.plan_with_config(start, end, &config, Some(&token))
    })
    .await;
    timer.abort();

    match result {
        Ok(summary) => Ok(summary?),
        Err(err) => Err(PlanError::TaskFailed(err.to_string())),
    }
}
