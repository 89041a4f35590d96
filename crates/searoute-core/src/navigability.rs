//! "At sea and deep enough" classification.

use crate::bathymetry::BathymetricField;
use crate::models::{Coordinate, DepthSample};

pub const DEFAULT_MIN_DEPTH_M: f64 = 3.0;

/// Navigability predicate bound to a depth field and a draft limit.
///
/// Unknown depth is never navigable.
#[derive(Debug, Clone, Copy)]
pub struct Navigability<'a> {
    field: &'a BathymetricField,
    min_depth_m: f64,
}

impl<'a> Navigability<'a> {
    pub fn new(field: &'a BathymetricField, min_depth_m: f64) -> Self {
        Self { field, min_depth_m }
    }

    pub fn field(&self) -> &'a BathymetricField {
        self.field
    }

    pub fn min_depth_m(&self) -> f64 {
        self.min_depth_m
    }

    pub fn depth_at(&self, coord: Coordinate) -> DepthSample {
        self.field.depth_at(coord)
    }

    pub fn is_navigable(&self, coord: Coordinate) -> bool {
        self.is_navigable_depth(self.depth_at(coord))
    }

    pub fn is_navigable_depth(&self, depth: DepthSample) -> bool {
        matches!(depth, DepthSample::Known(d) if d > self.min_depth_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bathymetry::BathymetryGrid;

    #[test]
    fn requires_depth_strictly_above_minimum() {
        let grid = BathymetryGrid::regular(0.0, 0.0, 1.0, 1, 4, |_, col| match col {
            0 => -3.0,
            1 => -3.5,
            2 => 10.0,
            _ => f64::NAN,
        })
        .unwrap();
        let field = BathymetricField::from_grid(grid);
        let nav = Navigability::new(&field, DEFAULT_MIN_DEPTH_M);
        let at = |lon: f64| Coordinate::new(0.0, lon).unwrap();

        assert!(!nav.is_navigable(at(0.0)));
        assert!(nav.is_navigable(at(1.0)));
        assert!(!nav.is_navigable(at(2.0)));
        assert!(!nav.is_navigable(at(3.0)));
        assert!(!nav.is_navigable(at(10.0)));
    }

    #[test]
    fn degraded_field_is_never_navigable() {
        let field = BathymetricField::unavailable("missing");
        let nav = Navigability::new(&field, 0.0);
        assert!(!nav.is_navigable(Coordinate::new(36.0, 10.0).unwrap()));
    }
}
