//! Spatial utility functions for route geometry.

use crate::models::Coordinate;

/// Earth radius in kilometers (mean radius).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree of latitude used by the flat-earth approximation.
pub const KM_PER_DEG_LAT: f64 = 111.0;

/// Calculate the great-circle distance between two points using the Haversine formula.
///
/// # Arguments
/// * `a` - First point
/// * `b` - Second point
///
/// # Returns
/// Distance in kilometers
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1_rad = a.lat().to_radians();
    let lat2_rad = b.lat().to_radians();
    let delta_lat = (b.lat() - a.lat()).to_radians();
    let delta_lon = (b.lon() - a.lon()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Flat-earth distance in kilometers.
///
/// Longitude is scaled by the cosine of the mean latitude. Used as the A*
/// heuristic and goal test; cheap, but only accurate over short spans.
pub fn flat_distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let mean_lat = ((a.lat() + b.lat()) / 2.0).to_radians();
    let dy = (b.lat() - a.lat()) * KM_PER_DEG_LAT;
    let dx = (b.lon() - a.lon()) * KM_PER_DEG_LAT * mean_lat.cos();
    (dx * dx + dy * dy).sqrt()
}

/// Euclidean distance in raw degrees.
pub fn degree_distance(a: Coordinate, b: Coordinate) -> f64 {
    let dlat = b.lat() - a.lat();
    let dlon = b.lon() - a.lon();
    (dlat * dlat + dlon * dlon).sqrt()
}

/// Linear interpolation in degree space; `t` in `[0, 1]`.
pub fn interpolate(a: Coordinate, b: Coordinate, t: f64) -> Coordinate {
    Coordinate::clamped(
        a.lat() + (b.lat() - a.lat()) * t,
        a.lon() + (b.lon() - a.lon()) * t,
    )
}

/// Evenly spaced points from `a` to `b`, inclusive: `segments + 1` points.
pub fn straight_line(a: Coordinate, b: Coordinate, segments: usize) -> Vec<Coordinate> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| match i {
            0 => a,
            i if i == segments => b,
            i => interpolate(a, b, i as f64 / segments as f64),
        })
        .collect()
}

/// Sum of great-circle distances between consecutive points.
pub fn path_length_km(points: &[Coordinate]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_km(pair[0], pair[1]))
        .sum()
}
