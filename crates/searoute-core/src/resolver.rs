//! Snapping of requested points onto navigable water.

use std::f64::consts::TAU;

use crate::models::Coordinate;
use crate::navigability::Navigability;
use crate::ports::{nearest_port, Port};
use crate::spatial::{degree_distance, KM_PER_DEG_LAT};

/// Search radii in degrees, tried in order before the configured maximum.
const RING_RADII_DEG: [f64; 6] = [0.01, 0.02, 0.05, 0.1, 0.2, 0.3];
const MIN_POINTS_PER_RING: usize = 8;
const POINTS_PER_DEGREE: f64 = 100.0;
const MAX_POINTS_PER_RING: usize = 720;

/// How an endpoint was mapped onto the water.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// Already navigable, used as is.
    Navigable(Coordinate),
    /// Replaced by a nearby navigable point.
    Substituted(Coordinate),
    /// Depth data is missing; replaced by the nearest known port.
    Port(&'a Port),
    /// Nothing usable within the search radius.
    NotFound,
}

impl Resolution<'_> {
    /// The coordinate to plan from, falling back to `requested`.
    pub fn coordinate_or(&self, requested: Coordinate) -> Coordinate {
        match self {
            Resolution::Navigable(c) | Resolution::Substituted(c) => *c,
            Resolution::Port(port) => port.location,
            Resolution::NotFound => requested,
        }
    }
}

/// Expanding-ring search for the nearest navigable coordinate.
#[derive(Debug, Clone, Copy)]
pub struct NavigablePointResolver<'a> {
    nav: Navigability<'a>,
    max_radius_deg: f64,
    good_enough_deg: f64,
    ports: &'a [Port],
}

impl<'a> NavigablePointResolver<'a> {
    pub fn new(nav: Navigability<'a>, max_radius_deg: f64, good_enough_deg: f64) -> Self {
        Self {
            nav,
            max_radius_deg,
            good_enough_deg,
            ports: &[],
        }
    }

    /// Ports used as substitutes when the depth field is degraded.
    pub fn with_ports(mut self, ports: &'a [Port]) -> Self {
        self.ports = ports;
        self
    }

    pub fn resolve(&self, coord: Coordinate) -> Option<Coordinate> {
        self.resolve_within(coord, self.max_radius_deg)
    }

    /// Nearest navigable point within `max_radius_deg`, or the point itself
    /// when it is already navigable.
    pub fn resolve_within(&self, coord: Coordinate, max_radius_deg: f64) -> Option<Coordinate> {
        if self.nav.is_navigable(coord) {
            return Some(coord);
        }
        let field = self.nav.field();
        if field.is_degraded() {
            return None;
        }

        let radii = RING_RADII_DEG
            .iter()
            .copied()
            .filter(|&r| r < max_radius_deg)
            .chain(std::iter::once(max_radius_deg));

        for radius in radii {
            let points = ((radius * POINTS_PER_DEGREE) as usize)
                .clamp(MIN_POINTS_PER_RING, MAX_POINTS_PER_RING);
            let mut best: Option<(Coordinate, f64)> = None;
            for i in 0..points {
                let angle = TAU * i as f64 / points as f64;
                let Some(candidate) = coord.offset(radius * angle.sin(), radius * angle.cos())
                else {
                    continue;
                };
                if !field.contains(candidate) || !self.nav.is_navigable(candidate) {
                    continue;
                }
                let distance = degree_distance(coord, candidate);
                if distance <= self.good_enough_deg + 1e-9 {
                    return Some(candidate);
                }
                if best.map_or(true, |(_, d)| distance < d) {
                    best = Some((candidate, distance));
                }
            }
            if let Some((candidate, _)) = best {
                return Some(candidate);
            }
        }
        None
    }

    pub fn resolve_endpoint(&self, coord: Coordinate) -> Resolution<'a> {
        if self.nav.field().is_degraded() {
            let limit_km = self.max_radius_deg * KM_PER_DEG_LAT;
            return match nearest_port(self.ports, coord, None) {
                Some((port, distance_km)) if distance_km <= limit_km => Resolution::Port(port),
                _ => Resolution::NotFound,
            };
        }
        if self.nav.is_navigable(coord) {
            return Resolution::Navigable(coord);
        }
        match self.resolve(coord) {
            Some(found) => Resolution::Substituted(found),
            None => Resolution::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bathymetry::{BathymetricField, BathymetryGrid};
    use crate::ports::default_ports;

    fn coast() -> BathymetricField {
        // land west of col 10, sea from col 10 eastward
        let grid = BathymetryGrid::regular(36.0, 10.0, 0.05, 20, 20, |_, col| {
            if col < 10 {
                25.0
            } else {
                -40.0
            }
        })
        .unwrap();
        BathymetricField::from_grid(grid)
    }

    #[test]
    fn navigable_point_is_returned_unchanged() {
        let field = coast();
        let resolver = NavigablePointResolver::new(Navigability::new(&field, 3.0), 0.5, 0.05);
        let sea = Coordinate::new(36.5, 10.75).unwrap();
        assert_eq!(resolver.resolve(sea), Some(sea));
        assert_eq!(resolver.resolve_endpoint(sea), Resolution::Navigable(sea));
    }

    #[test]
    fn land_next_to_sea_snaps_within_one_cell() {
        let field = coast();
        let nav = Navigability::new(&field, 3.0);
        let resolver = NavigablePointResolver::new(nav, 0.5, 0.05);
        let land = Coordinate::new(36.5, 10.45).unwrap();
        let found = resolver.resolve(land).unwrap();
        assert!(nav.is_navigable(found));
        assert!(degree_distance(land, found) <= 0.05 + 1e-9);
    }

    #[test]
    fn deep_inland_uses_larger_rings() {
        let field = coast();
        let nav = Navigability::new(&field, 3.0);
        let resolver = NavigablePointResolver::new(nav, 0.5, 0.05);
        let inland = Coordinate::new(36.5, 10.2).unwrap();
        let found = resolver.resolve(inland).unwrap();
        assert!(nav.is_navigable(found));
        assert!(found.lon() >= 10.475);
        assert!(degree_distance(inland, found) <= 0.5 + 1e-9);
        assert!(matches!(
            resolver.resolve_endpoint(inland),
            Resolution::Substituted(_)
        ));
    }

    #[test]
    fn radius_limit_yields_not_found() {
        let field = coast();
        let resolver = NavigablePointResolver::new(Navigability::new(&field, 3.0), 0.1, 0.05);
        let inland = Coordinate::new(36.5, 10.1).unwrap();
        assert_eq!(resolver.resolve(inland), None);
        assert_eq!(resolver.resolve_endpoint(inland), Resolution::NotFound);
        assert_eq!(resolver.resolve_endpoint(inland).coordinate_or(inland), inland);
    }

    #[test]
    fn huge_radius_samples_a_bounded_ring() {
        let grid = BathymetryGrid::regular(36.0, 10.0, 0.05, 4, 4, |_, _| 30.0).unwrap();
        let field = BathymetricField::from_grid(grid);
        let resolver = NavigablePointResolver::new(Navigability::new(&field, 3.0), 1e9, 0.05);
        let land = Coordinate::new(36.05, 10.05).unwrap();
        assert_eq!(resolver.resolve(land), None);
    }

    #[test]
    fn degraded_field_falls_back_to_ports() {
        let field = BathymetricField::unavailable("missing");
        let ports = default_ports();
        let resolver =
            NavigablePointResolver::new(Navigability::new(&field, 3.0), 0.5, 0.05).with_ports(&ports);
        let near_sousse = Coordinate::new(35.83, 10.64).unwrap();
        match resolver.resolve_endpoint(near_sousse) {
            Resolution::Port(port) => assert_eq!(port.name, "Port de Sousse"),
            other => panic!("expected port fallback, got {:?}", other),
        }
        let far_away = Coordinate::new(0.0, 0.0).unwrap();
        assert_eq!(resolver.resolve_endpoint(far_away), Resolution::NotFound);
    }
}
