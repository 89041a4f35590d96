//! Planner tuning parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound on the endpoint search radius (about 555 km).
pub const MAX_RESOLVER_RADIUS_DEG: f64 = 5.0;

/// A* heuristic flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    /// Flat-earth kilometres to the goal. Fast, not admissible.
    #[default]
    Kilometres,
    /// Kilometres divided by the length of one latitude step, a lower bound
    /// on the remaining edge cost.
    Admissible,
}

/// Configuration for route planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Angular spacing of the search lattice.
    pub grid_resolution_deg: f64,
    /// Water must be strictly deeper than this to be navigable.
    pub min_depth_m: f64,
    /// Below this depth edge costs are penalised.
    pub shallow_depth_m: f64,
    /// Lower bound of the shallow-water factor (max penalty is its inverse).
    pub shallow_penalty_floor: f64,
    pub max_iterations: usize,
    pub segment_threshold_km: f64,
    /// Number of legs for long routes; `segment_count - 1` interior anchors.
    pub segment_count: usize,
    pub resolver_max_radius_deg: f64,
    pub resolver_good_enough_deg: f64,
    /// Segments in a degraded straight-line fallback.
    pub straight_line_segments: usize,
    pub land_crossing_samples: usize,
    pub land_crossing_penalty: f64,
    pub heuristic: HeuristicKind,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            grid_resolution_deg: 0.05,
            min_depth_m: 3.0,
            shallow_depth_m: 20.0,
            shallow_penalty_floor: 0.5,
            max_iterations: 20_000,
            segment_threshold_km: 300.0,
            segment_count: 5,
            resolver_max_radius_deg: 0.5,
            resolver_good_enough_deg: 0.05,
            straight_line_segments: 10,
            land_crossing_samples: 3,
            land_crossing_penalty: 10.0,
            heuristic: HeuristicKind::Kilometres,
        }
    }
}

impl PlannerConfig {
    pub fn with_min_depth(mut self, min_depth_m: f64) -> Self {
        self.min_depth_m = min_depth_m;
        self
    }

    pub fn validate(&self) -> Result<()> {
        fn invalid(field: &'static str, message: &str) -> Result<()> {
            Err(Error::InvalidConfig {
                field,
                message: message.to_string(),
            })
        }

        if !(self.grid_resolution_deg.is_finite()
            && self.grid_resolution_deg > 0.0
            && self.grid_resolution_deg <= 1.0)
        {
            return invalid("grid_resolution_deg", "must be within (0, 1]");
        }
        if !(self.min_depth_m.is_finite() && self.min_depth_m >= 0.0) {
            return invalid("min_depth_m", "must be a non-negative number");
        }
        if !self.shallow_depth_m.is_finite() {
            return invalid("shallow_depth_m", "must be finite");
        }
        if !(self.shallow_penalty_floor > 0.0 && self.shallow_penalty_floor <= 1.0) {
            return invalid("shallow_penalty_floor", "must be within (0, 1]");
        }
        if self.max_iterations == 0 {
            return invalid("max_iterations", "must be at least 1");
        }
        if !(self.segment_threshold_km.is_finite() && self.segment_threshold_km > 0.0) {
            return invalid("segment_threshold_km", "must be positive");
        }
        if self.segment_count < 2 {
            return invalid("segment_count", "must be at least 2");
        }
        if !(self.resolver_max_radius_deg > 0.0
            && self.resolver_max_radius_deg <= MAX_RESOLVER_RADIUS_DEG)
        {
            return invalid("resolver_max_radius_deg", "must be within (0, 5]");
        }
        if !(self.resolver_good_enough_deg.is_finite() && self.resolver_good_enough_deg >= 0.0) {
            return invalid("resolver_good_enough_deg", "must be non-negative");
        }
        if self.straight_line_segments == 0 {
            return invalid("straight_line_segments", "must be at least 1");
        }
        if !(self.land_crossing_penalty.is_finite() && self.land_crossing_penalty >= 1.0) {
            return invalid("land_crossing_penalty", "must be at least 1");
        }
        Ok(())
    }
}
