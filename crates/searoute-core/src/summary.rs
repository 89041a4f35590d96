//! Caller-facing route report.

use serde::Serialize;

use crate::models::{
    Coordinate, EndpointResolution, Route, RouteStatus, RouteWarning, SegmentReport,
};
use crate::spatial::path_length_km;

/// A warning together with its display text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarningReport {
    #[serde(flatten)]
    pub warning: RouteWarning,
    pub message: String,
}

impl From<RouteWarning> for WarningReport {
    fn from(warning: RouteWarning) -> Self {
        let message = warning.to_string();
        Self { warning, message }
    }
}

/// Final result of `plan_route`.
///
/// `total_distance_km` is the physical great-circle length of the waypoint
/// path; `search_cost` is the internal edge-cost sum and is only meaningful
/// for comparing routes planned on the same dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub waypoints: Vec<Coordinate>,
    pub total_distance_km: f64,
    pub status: RouteStatus,
    pub start: EndpointResolution,
    pub end: EndpointResolution,
    pub segments: Vec<SegmentReport>,
    pub search_cost: Option<f64>,
    pub warnings: Vec<WarningReport>,
}

impl RouteSummary {
    pub fn is_clean(&self) -> bool {
        self.status == RouteStatus::Clean
    }

    pub fn has_warning(&self, predicate: impl Fn(&RouteWarning) -> bool) -> bool {
        self.warnings.iter().any(|w| predicate(&w.warning))
    }
}

pub fn summarize(route: Route) -> RouteSummary {
    let status = route
        .segments
        .iter()
        .map(|s| s.status)
        .fold(route.status, RouteStatus::worst);

    RouteSummary {
        total_distance_km: path_length_km(&route.waypoints),
        waypoints: route.waypoints,
        status,
        start: route.start,
        end: route.end,
        segments: route.segments,
        search_cost: route.search_cost,
        warnings: route.warnings.into_iter().map(WarningReport::from).collect(),
    }
}
