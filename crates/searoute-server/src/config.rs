//! Server configuration from environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use searoute_core::PlannerConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub dataset_path: PathBuf,
    pub min_depth_m: f64,
    pub grid_resolution_deg: f64,
    pub max_iterations: usize,
    pub segment_threshold_km: f64,
    pub segment_count: usize,
    /// Hard deadline for one planning request.
    pub plan_timeout: Duration,
    /// Snap endpoints to the nearest port while depth data is unavailable.
    pub port_fallback: bool,
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        let planner = PlannerConfig::default();
        Self {
            server_port: 3000,
            dataset_path: PathBuf::from("data/bathymetry.json"),
            min_depth_m: planner.min_depth_m,
            grid_resolution_deg: planner.grid_resolution_deg,
            max_iterations: planner.max_iterations,
            segment_threshold_km: planner.segment_threshold_km,
            segment_count: planner.segment_count,
            plan_timeout: Duration::from_secs(30),
            port_fallback: false,
            log_json: false,
        }
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn env_flag(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_parse("SEAROUTE_PORT").unwrap_or(defaults.server_port),
            dataset_path: env::var("SEAROUTE_DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),
            min_depth_m: env_parse("SEAROUTE_MIN_DEPTH_M").unwrap_or(defaults.min_depth_m),
            grid_resolution_deg: env_parse("SEAROUTE_GRID_RESOLUTION_DEG")
                .unwrap_or(defaults.grid_resolution_deg),
            max_iterations: env_parse("SEAROUTE_MAX_ITERATIONS")
                .unwrap_or(defaults.max_iterations),
            segment_threshold_km: env_parse("SEAROUTE_SEGMENT_THRESHOLD_KM")
                .unwrap_or(defaults.segment_threshold_km),
            segment_count: env_parse("SEAROUTE_SEGMENT_COUNT").unwrap_or(defaults.segment_count),
            plan_timeout: env_parse("SEAROUTE_PLAN_TIMEOUT_S")
                .map(Duration::from_secs)
                .unwrap_or(defaults.plan_timeout),
            port_fallback: env_flag("SEAROUTE_PORT_FALLBACK").unwrap_or(defaults.port_fallback),
            log_json: env_flag("SEAROUTE_LOG_JSON").unwrap_or(defaults.log_json),
        }
    }

    pub fn planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            min_depth_m: self.min_depth_m,
            grid_resolution_deg: self.grid_resolution_deg,
            max_iterations: self.max_iterations,
            segment_threshold_km: self.segment_threshold_km,
            segment_count: self.segment_count,
            ..PlannerConfig::default()
        }
    }
}
