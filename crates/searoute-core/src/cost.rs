//! Edge weights for the search lattice.

use crate::config::PlannerConfig;
use crate::models::{Coordinate, DepthSample};
use crate::navigability::Navigability;
use crate::spatial::interpolate;

const ADJACENCY_TOLERANCE: f64 = 1e-6;

/// Traversal cost of moving between two points at sea.
///
/// Every cost is a base distance in lattice steps times a shallow-water
/// multiplier in `[1, 1 / floor]`. Edges spanning more than one step also go
/// through the land-crossing guard.
#[derive(Debug, Clone, Copy)]
pub struct CostModel<'a> {
    nav: Navigability<'a>,
    resolution_deg: f64,
    shallow_depth_m: f64,
    penalty_floor: f64,
    land_samples: usize,
    land_penalty: f64,
}

impl<'a> CostModel<'a> {
    pub fn new(nav: Navigability<'a>, config: &PlannerConfig) -> Self {
        Self {
            nav,
            resolution_deg: config.grid_resolution_deg,
            shallow_depth_m: config.shallow_depth_m,
            penalty_floor: config.shallow_penalty_floor,
            land_samples: config.land_crossing_samples,
            land_penalty: config.land_crossing_penalty,
        }
    }

    pub fn navigability(&self) -> Navigability<'a> {
        self.nav
    }

    /// Cost multiplier for entering water of the given depth.
    pub fn depth_multiplier(&self, depth: DepthSample) -> f64 {
        let min_depth = self.nav.min_depth_m();
        match depth {
            DepthSample::Known(d) if d < self.shallow_depth_m => {
                let span = self.shallow_depth_m - min_depth;
                let factor = if span <= 0.0 {
                    self.penalty_floor
                } else {
                    ((d - min_depth) / span).clamp(self.penalty_floor, 1.0)
                };
                1.0 / factor
            }
            _ => 1.0,
        }
    }

    /// Cost of a single lattice step into a cell of the given depth.
    pub fn step_cost(&self, diagonal: bool, depth: DepthSample) -> f64 {
        let base = if diagonal { std::f64::consts::SQRT_2 } else { 1.0 };
        base * self.depth_multiplier(depth)
    }

    pub fn edge_cost(&self, from: Coordinate, to: Coordinate) -> f64 {
        let (base, adjacent) = self.base_cost(from, to);
        let mut cost = base * self.depth_multiplier(self.nav.depth_at(to));
        if !adjacent && self.might_cross_land(from, to) {
            cost *= self.land_penalty;
        }
        cost
    }

    /// Whether any interior sample on the straight segment is not navigable.
    pub fn might_cross_land(&self, from: Coordinate, to: Coordinate) -> bool {
        let n = self.land_samples;
        (1..=n).any(|i| {
            let t = i as f64 / (n + 1) as f64;
            !self.nav.is_navigable(interpolate(from, to, t))
        })
    }

    /// Total edge cost along `waypoints`, plus the multi-step legs flagged by
    /// the land-crossing guard.
    pub fn path_cost(&self, waypoints: &[Coordinate]) -> (f64, Vec<(Coordinate, Coordinate)>) {
        let mut total = 0.0;
        let mut flagged = Vec::new();
        for pair in waypoints.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            total += self.edge_cost(from, to);
            if !self.base_cost(from, to).1 && self.might_cross_land(from, to) {
                flagged.push((from, to));
            }
        }
        (total, flagged)
    }

    /// Base cost in lattice steps and whether the points are lattice neighbours.
    fn base_cost(&self, from: Coordinate, to: Coordinate) -> (f64, bool) {
        let dr = (to.lat() - from.lat()).abs() / self.resolution_deg;
        let dc = (to.lon() - from.lon()).abs() / self.resolution_deg;
        let limit = 1.0 + ADJACENCY_TOLERANCE;
        if dr <= limit && dc <= limit {
            let base = match (dr > ADJACENCY_TOLERANCE, dc > ADJACENCY_TOLERANCE) {
                (true, true) => std::f64::consts::SQRT_2,
                (false, false) => 0.0,
                _ => 1.0,
            };
            (base, true)
        } else {
            ((dr * dr + dc * dc).sqrt(), false)
        }
    }
}
