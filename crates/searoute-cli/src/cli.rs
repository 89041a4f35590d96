use std::path::PathBuf;

use clap::{Parser, Subcommand};
use searoute_core::{Coordinate, HeuristicKind, PlannerConfig, DEFAULT_MIN_DEPTH_M};

/// Plan sea routes that avoid land and shallow water
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Bathymetry dataset (.json grid, Esri .asc raster, or .nc with the netcdf feature)
    #[arg(long, global = true, default_value = "data/bathymetry.json")]
    pub dataset: PathBuf,

    /// Water must be deeper than this, in meters
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_DEPTH_M)]
    pub min_depth: f64,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plan a route between two points given as LAT,LON
    Plan {
        #[arg(long, allow_hyphen_values = true)]
        from: Coordinate,

        #[arg(long, allow_hyphen_values = true)]
        to: Coordinate,

        /// Search grid spacing in degrees
        #[arg(long, default_value_t = 0.05)]
        resolution: f64,

        /// A* iteration budget per segment
        #[arg(long, default_value_t = 20_000)]
        max_iterations: usize,

        /// Routes longer than this are planned in segments
        #[arg(long, default_value_t = 300.0)]
        segment_threshold_km: f64,

        /// Use the admissible (slower, cost-optimal) heuristic
        #[arg(long)]
        admissible: bool,

        /// Without depth data, move endpoints onto the nearest port
        #[arg(long)]
        port_fallback: bool,
    },

    /// Show the water depth at a point
    Depth {
        #[arg(long, allow_hyphen_values = true)]
        at: Coordinate,
    },

    /// Find the nearest known port
    NearestPort {
        #[arg(long, allow_hyphen_values = true)]
        at: Coordinate,

        /// Restrict to one governorate, e.g. Sfax
        #[arg(long)]
        region: Option<String>,
    },

    /// List protected areas around a point
    ProtectedAreas {
        #[arg(long, allow_hyphen_values = true)]
        at: Coordinate,

        /// Report areas whose centre is within this distance, in km
        #[arg(long, default_value_t = 10.0)]
        near_km: f64,

        /// Closer than this counts as inside the area, in km
        #[arg(long, default_value_t = 1.0)]
        inside_km: f64,
    },
}

impl Cli {
    /// Planner settings for the `plan` command; defaults for the others.
    pub fn planner_config(&self) -> PlannerConfig {
        let base = PlannerConfig::default().with_min_depth(self.min_depth);
        match &self.command {
            Command::Plan {
                resolution,
                max_iterations,
                segment_threshold_km,
                admissible,
                ..
            } => PlannerConfig {
                grid_resolution_deg: *resolution,
                max_iterations: *max_iterations,
                segment_threshold_km: *segment_threshold_km,
                heuristic: if *admissible {
                    HeuristicKind::Admissible
                } else {
                    HeuristicKind::Kilometres
                },
                ..base
            },
            _ => base,
        }
    }
}
