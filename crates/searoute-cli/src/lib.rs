//! Command line tools for the sea route planner.
//!
//! Binary:
//! - searoute: plan routes, look up depths, find the nearest port and check
//!   protected area proximity

pub mod cli;
pub mod output;

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use searoute_core::{
    areas_near, default_ports, default_protected_areas, nearest_port, BathymetricField,
    Navigability, ProximityRadii, RoutePlanner,
};
use serde_json::json;

pub use cli::{Cli, Command};

/// Execute one command, writing its result to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Command::Plan {
            from,
            to,
            port_fallback,
            ..
        } => {
            let field = BathymetricField::load(&cli.dataset);
            let mut planner = RoutePlanner::new(Arc::new(field), cli.planner_config())
                .context("invalid planner settings")?;
            if *port_fallback {
                planner = planner.with_ports(default_ports());
            }
            let summary = planner.plan_route(*from, *to);
            tracing::debug!(status = %summary.status, "plan finished");

            if cli.json {
                serde_json::to_writer_pretty(&mut *out, &summary)?;
                writeln!(out)?;
            } else {
                write!(out, "{}", output::render_route(&summary))?;
            }
        }
        Command::Depth { at } => {
            let field = BathymetricField::load(&cli.dataset);
            let nav = Navigability::new(&field, cli.min_depth);
            let depth = nav.depth_at(*at);
            let navigable = nav.is_navigable_depth(depth);

            if cli.json {
                let body = json!({
                    "coordinate": at,
                    "depth": depth,
                    "navigable": navigable,
                    "degraded": field.is_degraded(),
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            } else {
                writeln!(
                    out,
                    "{}",
                    output::render_depth(depth, navigable, field.is_degraded())
                )?;
            }
        }
        Command::NearestPort { at, region } => {
            let ports = default_ports();
            let Some((port, distance_km)) = nearest_port(&ports, *at, region.as_deref()) else {
                bail!("no port found for region {:?}", region.as_deref().unwrap_or("any"));
            };

            if cli.json {
                let body = json!({ "port": port, "distance_km": distance_km });
                writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            } else {
                writeln!(out, "{}", output::render_port(port, distance_km))?;
            }
        }
        Command::ProtectedAreas {
            at,
            near_km,
            inside_km,
        } => {
            let radii = ProximityRadii {
                inside_km: *inside_km,
                near_km: *near_km,
            };
            radii.validate().context("invalid proximity radii")?;
            let areas = default_protected_areas();
            let hits = areas_near(&areas, *at, radii);

            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&hits)?)?;
            } else {
                write!(out, "{}", output::render_protected_areas(&hits))?;
            }
        }
    }
    Ok(())
}
