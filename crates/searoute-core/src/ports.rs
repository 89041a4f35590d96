//! Static port reference data.

use serde::Serialize;

use crate::models::Coordinate;
use crate::spatial::haversine_km;

/// A named harbour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Port {
    pub name: String,
    /// Administrative region (governorate) the port belongs to.
    pub region: String,
    pub location: Coordinate,
}

impl Port {
    pub fn new(name: impl Into<String>, region: impl Into<String>, location: Coordinate) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            location,
        }
    }
}

const TUNISIAN_PORTS: &[(&str, &str, f64, f64)] = &[
    ("Port de Tabarka", "Jendouba", 36.9558, 8.7339),
    ("Port de Monastir", "Monastir", 35.7789, 10.8262),
    ("Port de Sayada", "Monastir", 35.65, 11.0833),
    ("Port de Ksibet Mediouni", "Monastir", 35.5667, 11.0333),
    ("Port de Gabes", "Gabes", 33.8869, 10.1082),
    ("Port de Zarat", "Gabes", 33.7333, 10.2667),
    ("Port de Zarzouna", "Bizerte", 37.2744, 9.8746),
    ("Port de Ghar El Melh", "Bizerte", 37.1667, 10.2167),
    ("Port de Cap Zebib", "Bizerte", 37.2333, 10.05),
    ("Port de Sidi Mechreg", "Bizerte", 37.2333, 9.8),
    ("Port de Zarzis", "Medenine", 33.5039, 11.1172),
    ("Port de Houmet Souk", "Medenine", 33.9167, 10.8667),
    ("Port d'Ajim", "Medenine", 33.95, 10.8167),
    ("Port de Boughrara", "Medenine", 33.75, 10.9667),
    ("Port de Mahdia", "Mahdia", 35.505, 11.062),
    ("Port de Chebba", "Mahdia", 35.4333, 11.1167),
    ("Port de Salakta", "Mahdia", 35.55, 11.0333),
    ("Port de Malloulech", "Mahdia", 35.5167, 11.0833),
    ("Port de Kalaat Landalous", "Ariana", 36.85, 10.3167),
    ("Port de la Goulette", "Tunis", 36.8333, 10.3167),
    ("Port de Kelibia", "Nabeul", 36.8444, 11.0889),
    ("Port de Beni Khiar", "Nabeul", 36.7333, 10.8833),
    ("Port de Haouaria", "Nabeul", 36.8167, 10.95),
    ("Port de Sidi Daoud", "Nabeul", 36.75, 10.8833),
    ("Port de Sfax", "Sfax", 34.7272, 10.7603),
    ("Port de Mahres", "Sfax", 34.5333, 10.5),
    ("Port de Skhira", "Sfax", 34.3, 10.1),
    ("Port de Kraten", "Sfax", 34.65, 10.65),
    ("Port de Sousse", "Sousse", 35.8272, 10.6356),
    ("Port de Hergla", "Sousse", 36.0333, 10.5),
    ("Port de Louza - Louata", "Sousse", 35.8167, 10.6),
    ("Port de Zaboussa", "Sousse", 35.85, 10.6333),
    ("Port d'El Aouabed", "Sousse", 35.8333, 10.6167),
];

/// The built-in list of Tunisian fishing and commercial ports.
pub fn default_ports() -> Vec<Port> {
    TUNISIAN_PORTS
        .iter()
        .filter_map(|&(name, region, lat, lon)| {
            Coordinate::new(lat, lon)
                .ok()
                .map(|location| Port::new(name, region, location))
        })
        .collect()
}

/// Nearest port to `coord` and its great-circle distance in km, optionally
/// restricted to one region (case-insensitive).
pub fn nearest_port<'a>(
    ports: &'a [Port],
    coord: Coordinate,
    region: Option<&str>,
) -> Option<(&'a Port, f64)> {
    ports
        .iter()
        .filter(|port| region.map_or(true, |r| port.region.eq_ignore_ascii_case(r.trim())))
        .map(|port| (port, haversine_km(coord, port.location)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_is_complete() {
        let ports = default_ports();
        assert_eq!(ports.len(), TUNISIAN_PORTS.len());
        assert!(ports.iter().any(|p| p.name == "Port de Sfax"));
    }

    #[test]
    fn finds_nearest_port() {
        let ports = default_ports();
        let near_sfax = Coordinate::new(34.74, 10.78).unwrap();
        let (port, distance) = nearest_port(&ports, near_sfax, None).unwrap();
        assert_eq!(port.name, "Port de Sfax");
        assert!(distance < 5.0);
    }

    #[test]
    fn region_filter_is_case_insensitive() {
        let ports = default_ports();
        let near_sfax = Coordinate::new(34.74, 10.78).unwrap();
        let (port, _) = nearest_port(&ports, near_sfax, Some("mahdia")).unwrap();
        assert_eq!(port.region, "Mahdia");
        assert!(nearest_port(&ports, near_sfax, Some("Atlantis")).is_none());
        assert!(nearest_port(&[], near_sfax, None).is_none());
    }
}
