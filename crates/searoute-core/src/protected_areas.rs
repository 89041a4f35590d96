//! Static marine protected area reference data and proximity checks.
//!
//! The planner never reads these; callers use them to warn about a position.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::Coordinate;
use crate::spatial::haversine_km;

/// A named protected site, approximated by its centre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtectedArea {
    pub name: String,
    /// Legal designation, e.g. "Site Ramsar (2007)".
    pub status: String,
    pub centre: Coordinate,
}

impl ProtectedArea {
    pub fn new(name: impl Into<String>, status: impl Into<String>, centre: Coordinate) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
            centre,
        }
    }
}

const TUNISIAN_PROTECTED_AREAS: &[(&str, &str, f64, f64)] = &[
    ("Archipel de la Galite", "ASPIM (2001)", 37.5, 8.9),
    ("Bahiret El Bibane", "Site Ramsar (2007)", 33.5, 11.0),
    ("Complexe des Zones Humides de Sebkhret Oum Ez-Zessar et Sebkhret El Grine", "Site Ramsar (2013)", 33.7, 10.8),
    ("Complexe des Zones Humides des Chott El Guetayate et Sebkhret Dhreia et Oueds Akarit, Rekhama et Meleh", "Site Ramsar (2012)", 34.0, 10.0),
    ("Complexe Lac de Tunis", "Site Ramsar (2013)", 36.8, 10.2),
    ("Djerba Bin El Ouedian", "Site Ramsar (2007)", 33.8, 10.9),
    ("Djerba Guellala", "Site Ramsar (2007)", 33.7, 10.9),
    ("Djerba Ras Rmel", "Site Ramsar (2007)", 33.9, 10.9),
    ("Galiton", "Réserve naturelle (1980)", 37.4, 8.8),
    ("Lague de Boughrara", "Site Ramsar (2012)", 33.6, 10.7),
    ("Iles Kerkennah", "Site Ramsar (2012)", 34.7, 11.0),
    ("Iles Kneiss", "Réserve Naturelle (1993), ASPIM (2001), Site Ramsar (2007)", 34.4, 10.3),
    ("Iles Zembra et Zembretta", "Réserve de Biosphère (1977), Parc National (1973), ASPIM (2003)", 37.1, 10.8),
    ("Lague de Ghar El Melh et Delta de la Mejerda", "Site Ramsar (2007)", 37.2, 10.2),
    ("Lagunes du Cap Bon Oriental", "Site Ramsar (2007)", 36.9, 10.9),
    ("Salines De Thyna", "Site Ramsar (2007)", 34.2, 10.1),
    ("Sebkhret Soliman", "Site Ramsar (2007)", 36.7, 10.5),
    ("Sebkhret Halk El Manzel Oued Essed", "Site Ramsar (2012)", 36.6, 10.6),
    ("Iles Kneiss", "Proposed AMCP", 34.4, 10.3),
    ("Archipel de la Galite", "Proposed AMCP", 37.5, 8.9),
    ("Iles Kuriat", "Proposed AMCP", 35.8, 10.9),
    ("Zembra et Zembretta", "Proposed AMCP", 37.1, 10.8),
];

/// The built-in list of Tunisian marine and coastal protected areas.
pub fn default_protected_areas() -> Vec<ProtectedArea> {
    TUNISIAN_PROTECTED_AREAS
        .iter()
        .filter_map(|&(name, status, lat, lon)| {
            Coordinate::new(lat, lon)
                .ok()
                .map(|centre| ProtectedArea::new(name, status, centre))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Proximity {
    Inside,
    Near,
}

/// Radii around each area centre, in km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityRadii {
    pub inside_km: f64,
    pub near_km: f64,
}

impl Default for ProximityRadii {
    fn default() -> Self {
        Self {
            inside_km: 1.0,
            near_km: 10.0,
        }
    }
}

impl ProximityRadii {
    pub fn validate(&self) -> Result<()> {
        let invalid = |field, message: &str| {
            Err(Error::InvalidConfig {
                field,
                message: message.to_string(),
            })
        };
        if !(self.near_km.is_finite() && self.near_km >= 0.0) {
            return invalid("near_km", "must be a non-negative number");
        }
        if !(self.inside_km.is_finite() && self.inside_km >= 0.0) {
            return invalid("inside_km", "must be a non-negative number");
        }
        if self.inside_km > self.near_km {
            return invalid("inside_km", "must not exceed near_km");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaProximity<'a> {
    pub area: &'a ProtectedArea,
    pub distance_km: f64,
    pub proximity: Proximity,
}

/// Areas whose centre lies within `radii.near_km` of `coord`, closest first.
pub fn areas_near<'a>(
    areas: &'a [ProtectedArea],
    coord: Coordinate,
    radii: ProximityRadii,
) -> Vec<AreaProximity<'a>> {
    let mut hits: Vec<_> = areas
        .iter()
        .filter_map(|area| {
            let distance_km = haversine_km(coord, area.centre);
            (distance_km <= radii.near_km).then(|| AreaProximity {
                area,
                distance_km,
                proximity: if distance_km <= radii.inside_km {
                    Proximity::Inside
                } else {
                    Proximity::Near
                },
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    hits
}
