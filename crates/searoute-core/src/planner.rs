//! Route planning entry point.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn};

use crate::bathymetry::BathymetricField;
use crate::cancel::CancelToken;
use crate::config::PlannerConfig;
use crate::cost::CostModel;
use crate::error::Result;
use crate::models::{
    Coordinate, DepthSample, Endpoint, EndpointResolution, Route, RouteStatus, RouteWarning,
};
use crate::navigability::Navigability;
use crate::ports::Port;
use crate::resolver::{NavigablePointResolver, Resolution};
use crate::search::GridAStar;
use crate::segmenter::RouteSegmenter;
use crate::spatial::straight_line;
use crate::summary::{summarize, RouteSummary};

/// Plans sea routes against a shared, read-only depth field.
///
/// Cheap to share behind an `Arc`; every call owns its own search state.
#[derive(Debug, Clone)]
pub struct RoutePlanner {
    field: Arc<BathymetricField>,
    config: PlannerConfig,
    ports: Vec<Port>,
}

impl RoutePlanner {
    pub fn new(field: Arc<BathymetricField>, config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            field,
            config,
            ports: Vec::new(),
        })
    }

    /// Ports used to substitute endpoints while the depth field is degraded.
    pub fn with_ports(mut self, ports: Vec<Port>) -> Self {
        self.ports = ports;
        self
    }

    pub fn field(&self) -> &BathymetricField {
        &self.field
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn depth_at(&self, coord: Coordinate) -> DepthSample {
        self.field.depth_at(coord)
    }

    pub fn is_navigable(&self, coord: Coordinate) -> bool {
        Navigability::new(&self.field, self.config.min_depth_m).is_navigable(coord)
    }

    pub fn plan_route(&self, start: Coordinate, end: Coordinate) -> RouteSummary {
        self.plan(start, end, &self.config, None)
    }

    pub fn plan_route_with_cancel(
        &self,
        start: Coordinate,
        end: Coordinate,
        cancel: &CancelToken,
    ) -> RouteSummary {
        self.plan(start, end, &self.config, Some(cancel))
    }

    /// Plan with per-request overrides of the planner configuration.
    pub fn plan_with_config(
        &self,
        start: Coordinate,
        end: Coordinate,
        config: &PlannerConfig,
        cancel: Option<&CancelToken>,
    ) -> Result<RouteSummary> {
        config.validate()?;
        Ok(self.plan(start, end, config, cancel))
    }

    fn plan(
        &self,
        start: Coordinate,
        end: Coordinate,
        config: &PlannerConfig,
        cancel: Option<&CancelToken>,
    ) -> RouteSummary {
        let span = info_span!("plan_route", start = %start, end = %end);
        let _enter = span.enter();

        let nav = Navigability::new(&self.field, config.min_depth_m);
        let resolver = NavigablePointResolver::new(
            nav,
            config.resolver_max_radius_deg,
            config.resolver_good_enough_deg,
        )
        .with_ports(&self.ports);

        let mut warnings = Vec::new();
        let start_res = self.resolve_endpoint(&resolver, Endpoint::Start, start, &mut warnings);
        let end_res = self.resolve_endpoint(&resolver, Endpoint::End, end, &mut warnings);

        let route = if self.field.is_degraded() {
            warn!("Depth data unavailable, returning straight-line route");
            warnings.insert(
                0,
                RouteWarning::DataUnavailable {
                    reason: self.field.load_error().map(str::to_string),
                },
            );
            let waypoints = if start_res.resolved == end_res.resolved {
                vec![start_res.resolved]
            } else {
                straight_line(
                    start_res.resolved,
                    end_res.resolved,
                    config.straight_line_segments,
                )
            };
            Route {
                waypoints,
                status: RouteStatus::DegradedStraightLine,
                start: start_res,
                end: end_res,
                segments: Vec::new(),
                warnings,
                search_cost: None,
            }
        } else {
            let cost = CostModel::new(nav, config);
            let segmenter = RouteSegmenter::new(GridAStar::new(cost, config), resolver, config);
            let plan = segmenter.plan(start_res.resolved, end_res.resolved, cancel);
            warnings.extend(plan.warnings);

            let mut status = plan.status;
            if start_res.substituted || end_res.substituted {
                status = status.worst(RouteStatus::SubstitutedEndpoint);
            }

            let (search_cost, flagged) = cost.path_cost(&plan.waypoints);
            for (from, to) in flagged {
                warn!("Leg {} -> {} may cross land", from, to);
                warnings.push(RouteWarning::PossibleLandCrossing { from, to });
            }

            Route {
                waypoints: plan.waypoints,
                status,
                start: start_res,
                end: end_res,
                segments: plan.segments,
                warnings,
                search_cost: Some(search_cost),
            }
        };

        let summary = summarize(route);
        info!(
            waypoints = summary.waypoints.len(),
            distance_km = summary.total_distance_km,
            status = %summary.status,
            "Route planned"
        );
        summary
    }

    fn resolve_endpoint(
        &self,
        resolver: &NavigablePointResolver<'_>,
        endpoint: Endpoint,
        requested: Coordinate,
        warnings: &mut Vec<RouteWarning>,
    ) -> EndpointResolution {
        let resolved = match resolver.resolve_endpoint(requested) {
            Resolution::Navigable(coord) => coord,
            Resolution::Substituted(coord) => {
                debug!(%endpoint, from = %requested, to = %coord, "Endpoint moved to navigable water");
                coord
            }
            Resolution::Port(port) => {
                debug!(%endpoint, port = %port.name, "Endpoint moved to nearest port");
                port.location
            }
            Resolution::NotFound if self.field.is_degraded() => requested,
            Resolution::NotFound => {
                warn!("No navigable water near {} point {}", endpoint, requested);
                warnings.push(RouteWarning::EndpointNotNavigable {
                    endpoint,
                    coordinate: requested,
                });
                return EndpointResolution {
                    requested,
                    resolved: requested,
                    substituted: false,
                    warning: true,
                };
            }
        };
        EndpointResolution {
            requested,
            resolved,
            substituted: resolved != requested,
            warning: false,
        }
    }
}
