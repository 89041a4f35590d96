//! Plain-text rendering for terminal output.

use std::fmt::Write as _;

use searoute_core::{
    AreaProximity, DepthSample, EndpointResolution, Port, Proximity, RouteSummary,
};

fn endpoint_line(label: &str, endpoint: &EndpointResolution) -> String {
    if endpoint.substituted {
        format!(
            "{}: {} (moved from {})",
            label, endpoint.resolved, endpoint.requested
        )
    } else if endpoint.warning {
        format!("{}: {} (not navigable)", label, endpoint.resolved)
    } else {
        format!("{}: {}", label, endpoint.resolved)
    }
}

pub fn render_route(summary: &RouteSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Status: {}", summary.status);
    let _ = writeln!(
        out,
        "Distance: {:.1} km, {} waypoints, {} segment(s)",
        summary.total_distance_km,
        summary.waypoints.len(),
        summary.segments.len()
    );
    if let Some(cost) = summary.search_cost {
        let _ = writeln!(out, "Search cost: {:.2}", cost);
    }
    let _ = writeln!(out, "{}", endpoint_line("Start", &summary.start));
    let _ = writeln!(out, "{}", endpoint_line("End", &summary.end));

    if !summary.warnings.is_empty() {
        let _ = writeln!(out, "Warnings:");
        for report in &summary.warnings {
            let _ = writeln!(out, "  - {}", report.message);
        }
    }

    let _ = writeln!(out, "Waypoints:");
    for point in &summary.waypoints {
        let _ = writeln!(out, "  {}", point);
    }
    out
}

pub fn render_depth(depth: DepthSample, navigable: bool, degraded: bool) -> String {
    let depth = match depth.meters() {
        Some(m) => format!("{:.1} m", m),
        None => "unknown".to_string(),
    };
    let mut line = format!(
        "Depth: {}, {}",
        depth,
        if navigable { "navigable" } else { "not navigable" }
    );
    if degraded {
        line.push_str(" (no bathymetry loaded)");
    }
    line
}

pub fn render_port(port: &Port, distance_km: f64) -> String {
    format!(
        "{} ({}) at {}, {:.1} km away",
        port.name, port.region, port.location, distance_km
    )
}

pub fn render_protected_areas(hits: &[AreaProximity<'_>]) -> String {
    if hits.is_empty() {
        return "No protected area nearby\n".to_string();
    }
    let mut out = String::new();
    for hit in hits {
        let proximity = match hit.proximity {
            Proximity::Inside => "inside",
            Proximity::Near => "near",
        };
        let _ = writeln!(
            out,
            "{} ({}): {}, {:.2} km from {}",
            hit.area.name, hit.area.status, proximity, hit.distance_km, hit.area.centre
        );
    }
    out
}
