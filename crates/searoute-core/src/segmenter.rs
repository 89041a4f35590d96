//! Splitting long requests into independently searched legs.

use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::config::PlannerConfig;
use crate::models::{Coordinate, RouteStatus, RouteWarning, SegmentReport};
use crate::resolver::NavigablePointResolver;
use crate::search::{GridAStar, SearchOutcome};
use crate::spatial::{haversine_km, interpolate, straight_line};

/// Waypoints of a multi-leg plan and what happened on each leg.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedPlan {
    pub waypoints: Vec<Coordinate>,
    pub segments: Vec<SegmentReport>,
    pub warnings: Vec<RouteWarning>,
    pub status: RouteStatus,
}

/// Runs one grid search per leg between consecutive anchor points.
#[derive(Debug, Clone, Copy)]
pub struct RouteSegmenter<'a> {
    search: GridAStar<'a>,
    resolver: NavigablePointResolver<'a>,
    segment_threshold_km: f64,
    segment_count: usize,
    straight_line_segments: usize,
}

impl<'a> RouteSegmenter<'a> {
    pub fn new(
        search: GridAStar<'a>,
        resolver: NavigablePointResolver<'a>,
        config: &PlannerConfig,
    ) -> Self {
        Self {
            search,
            resolver,
            segment_threshold_km: config.segment_threshold_km,
            segment_count: config.segment_count,
            straight_line_segments: config.straight_line_segments,
        }
    }

    /// Anchor points for the legs: `[start, end]` for short requests, otherwise
    /// `segment_count - 1` resolved interior points between them.
    pub fn anchors(&self, start: Coordinate, end: Coordinate) -> (Vec<Coordinate>, Vec<RouteWarning>) {
        let mut warnings = Vec::new();
        if haversine_km(start, end) <= self.segment_threshold_km {
            return (vec![start, end], warnings);
        }

        let mut anchors = Vec::with_capacity(self.segment_count + 1);
        anchors.push(start);
        for i in 1..self.segment_count {
            let raw = interpolate(start, end, i as f64 / self.segment_count as f64);
            match self.resolver.resolve(raw) {
                Some(resolved) => anchors.push(resolved),
                None => {
                    warn!("Intermediate waypoint {} at {} is not navigable", i, raw);
                    warnings.push(RouteWarning::WaypointNotNavigable {
                        index: i,
                        coordinate: raw,
                    });
                    anchors.push(raw);
                }
            }
        }
        anchors.push(end);
        (anchors, warnings)
    }

    pub fn plan(
        &self,
        start: Coordinate,
        end: Coordinate,
        cancel: Option<&CancelToken>,
    ) -> SegmentedPlan {
        let (anchors, mut warnings) = self.anchors(start, end);
        let total_segments = anchors.len() - 1;
        let mut waypoints: Vec<Coordinate> = Vec::new();
        let mut segments = Vec::with_capacity(total_segments);
        let mut status = RouteStatus::Clean;

        for (index, pair) in anchors.windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);

            if cancel.is_some_and(CancelToken::is_cancelled) {
                status = self.truncate(index, total_segments, &mut warnings);
                break;
            }

            let outcome = self.search.search_with_cancel(from, to, cancel);
            let iterations = outcome.iterations();
            let (leg, leg_status) = match outcome {
                SearchOutcome::Found { path, .. } => (path, RouteStatus::Clean),
                SearchOutcome::Exhausted { iterations } => {
                    warn!(
                        "No path found for segment {} after {} iterations, using straight line",
                        index, iterations
                    );
                    warnings.push(RouteWarning::SearchExhausted {
                        segment: index,
                        iterations,
                    });
                    (
                        straight_line(from, to, self.straight_line_segments),
                        RouteStatus::DegradedStraightLine,
                    )
                }
                SearchOutcome::Cancelled { .. } => {
                    status = self.truncate(index, total_segments, &mut warnings);
                    break;
                }
            };

            debug!(
                segment = index,
                iterations,
                points = leg.len(),
                status = %leg_status,
                "Segment planned"
            );
            segments.push(SegmentReport {
                index,
                from,
                to,
                status: leg_status,
                iterations,
                waypoints: leg.len(),
            });
            status = status.worst(leg_status);
            append_leg(&mut waypoints, &leg);
        }

        if waypoints.is_empty() {
            waypoints.push(start);
        }

        SegmentedPlan {
            waypoints,
            segments,
            warnings,
            status,
        }
    }

    fn truncate(
        &self,
        completed: usize,
        total: usize,
        warnings: &mut Vec<RouteWarning>,
    ) -> RouteStatus {
        warn!("Route planning cancelled after {} of {} segments", completed, total);
        warnings.push(RouteWarning::Cancelled {
            completed_segments: completed,
            total_segments: total,
        });
        RouteStatus::Truncated
    }
}

/// Append a leg, dropping its first point when it repeats the junction.
fn append_leg(waypoints: &mut Vec<Coordinate>, leg: &[Coordinate]) {
    let skip = match (waypoints.last(), leg.first()) {
        (Some(last), Some(first)) => {
            ((last.lat() - first.lat()).abs() < 1e-9 && (last.lon() - first.lon()).abs() < 1e-9)
                as usize
        }
        _ => 0,
    };
    waypoints.extend_from_slice(&leg[skip.min(leg.len())..]);
}
