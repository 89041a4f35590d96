//! Core data models for sea route planning.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A geographic position in decimal degrees.
///
/// Construction is range-checked, so every `Coordinate` in the system is valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = Error;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Coordinate::new(raw.lat, raw.lon)
    }
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        if !valid {
            return Err(Error::InvalidCoordinate { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    /// Build a coordinate from values already known to be in range, absorbing
    /// floating-point overshoot from interpolation.
    pub(crate) fn clamped(lat: f64, lon: f64) -> Self {
        Self {
            lat: lat.clamp(-90.0, 90.0),
            lon: lon.clamp(-180.0, 180.0),
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Shift by degree deltas; `None` when the result leaves the valid range.
    pub fn offset(&self, dlat: f64, dlon: f64) -> Option<Coordinate> {
        Coordinate::new(self.lat + dlat, self.lon + dlon).ok()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lon)
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let parse_error = || Error::CoordinateParse {
            input: input.to_string(),
        };
        let (lat, lon) = input.split_once(',').ok_or_else(parse_error)?;
        let lat: f64 = lat.trim().parse().map_err(|_| parse_error())?;
        let lon: f64 = lon.trim().parse().map_err(|_| parse_error())?;
        Coordinate::new(lat, lon)
    }
}

/// Water depth at a point, in meters below sea level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "depth_m", rename_all = "snake_case")]
pub enum DepthSample {
    /// Known depth; `0.0` means land or sea level.
    Known(f64),
    /// Outside coverage, missing sample, or no dataset.
    Unknown,
}

impl DepthSample {
    /// Convert a dataset elevation (negative below sea level) into a depth.
    pub fn from_elevation(elevation_m: f64) -> Self {
        if !elevation_m.is_finite() {
            return DepthSample::Unknown;
        }
        if elevation_m >= 0.0 {
            DepthSample::Known(0.0)
        } else {
            DepthSample::Known(-elevation_m)
        }
    }

    pub fn meters(self) -> Option<f64> {
        match self {
            DepthSample::Known(depth) => Some(depth),
            DepthSample::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, DepthSample::Known(_))
    }
}

/// A node of the implicit search lattice, as step offsets from its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    pub row: i32,
    pub col: i32,
}

impl GridCell {
    pub const ORIGIN: GridCell = GridCell { row: 0, col: 0 };

    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The 8-connected neighbours, excluding the cell itself.
    pub fn neighbours(self) -> impl Iterator<Item = GridCell> {
        const OFFSETS: [(i32, i32); 8] = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ];
        OFFSETS
            .into_iter()
            .map(move |(dr, dc)| GridCell::new(self.row + dr, self.col + dc))
    }

    pub fn is_diagonal_to(self, other: GridCell) -> bool {
        self.row != other.row && self.col != other.col
    }
}

/// Quality of a planned route, ordered from best to worst.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    /// Grid search succeeded between the requested endpoints.
    #[default]
    Clean,
    /// At least one endpoint was moved to nearby navigable water.
    SubstitutedEndpoint,
    /// Part of the route is a straight line without navigability guarantees.
    DegradedStraightLine,
    /// Planning was cancelled before reaching the destination.
    Truncated,
}

impl RouteStatus {
    /// The more degraded of two statuses.
    pub fn worst(self, other: RouteStatus) -> RouteStatus {
        self.max(other)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RouteStatus::Clean => "clean",
            RouteStatus::SubstitutedEndpoint => "substituted_endpoint",
            RouteStatus::DegradedStraightLine => "degraded_straight_line",
            RouteStatus::Truncated => "truncated",
        }
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::Start => "start",
            Endpoint::End => "end",
        })
    }
}

/// How a requested endpoint was mapped onto navigable water.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EndpointResolution {
    pub requested: Coordinate,
    pub resolved: Coordinate,
    /// The resolved point differs from the requested one.
    pub substituted: bool,
    /// No navigable substitute was found; `resolved` is the raw request.
    pub warning: bool,
}

impl EndpointResolution {
    pub fn unchanged(coordinate: Coordinate) -> Self {
        Self {
            requested: coordinate,
            resolved: coordinate,
            substituted: false,
            warning: false,
        }
    }
}

/// Non-fatal conditions encountered while planning.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteWarning {
    DataUnavailable {
        reason: Option<String>,
    },
    EndpointNotNavigable {
        endpoint: Endpoint,
        coordinate: Coordinate,
    },
    WaypointNotNavigable {
        index: usize,
        coordinate: Coordinate,
    },
    SearchExhausted {
        segment: usize,
        iterations: usize,
    },
    PossibleLandCrossing {
        from: Coordinate,
        to: Coordinate,
    },
    Cancelled {
        completed_segments: usize,
        total_segments: usize,
    },
}

impl fmt::Display for RouteWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteWarning::DataUnavailable { .. } => {
                f.write_str("depth data unavailable; path may cross land")
            }
            RouteWarning::EndpointNotNavigable {
                endpoint,
                coordinate,
            } => write!(
                f,
                "no navigable water found near {} point {}; using it unchanged",
                endpoint, coordinate
            ),
            RouteWarning::WaypointNotNavigable { index, coordinate } => write!(
                f,
                "intermediate waypoint {} at {} is not in navigable water",
                index, coordinate
            ),
            RouteWarning::SearchExhausted {
                segment,
                iterations,
            } => write!(
                f,
                "no path found for segment {} after {} iterations; using a straight line",
                segment, iterations
            ),
            RouteWarning::PossibleLandCrossing { from, to } => {
                write!(f, "leg {} -> {} may cross land", from, to)
            }
            RouteWarning::Cancelled {
                completed_segments,
                total_segments,
            } => write!(
                f,
                "planning cancelled after {} of {} segments",
                completed_segments, total_segments
            ),
        }
    }
}

/// Outcome of one grid search between consecutive anchor points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentReport {
    pub index: usize,
    pub from: Coordinate,
    pub to: Coordinate,
    pub status: RouteStatus,
    pub iterations: usize,
    pub waypoints: usize,
}

/// An ordered waypoint path with its provenance, before summarization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub waypoints: Vec<Coordinate>,
    pub status: RouteStatus,
    pub start: EndpointResolution,
    pub end: EndpointResolution,
    pub segments: Vec<SegmentReport>,
    pub warnings: Vec<RouteWarning>,
    pub search_cost: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_rejects_out_of_range_values() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(matches!(
            Coordinate::new(90.5, 0.0),
            Err(Error::InvalidCoordinate { .. })
        ));
        assert!(Coordinate::new(0.0, -180.01).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn coordinate_parses_lat_lon_pairs() {
        let coord: Coordinate = "36.8, 10.2".parse().unwrap();
        assert_eq!(coord.lat(), 36.8);
        assert_eq!(coord.lon(), 10.2);
        assert!(matches!(
            "36.8".parse::<Coordinate>(),
            Err(Error::CoordinateParse { .. })
        ));
        assert!(matches!(
            "95,10".parse::<Coordinate>(),
            Err(Error::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn coordinate_deserialization_is_range_checked() {
        let ok: Coordinate = serde_json::from_str(r#"{"lat": 34.7, "lon": 10.8}"#).unwrap();
        assert_eq!(ok.lon(), 10.8);
        let bad = serde_json::from_str::<Coordinate>(r#"{"lat": 134.7, "lon": 10.8}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn depth_follows_elevation_sign_convention() {
        assert_eq!(DepthSample::from_elevation(-42.5), DepthSample::Known(42.5));
        assert_eq!(DepthSample::from_elevation(0.0), DepthSample::Known(0.0));
        assert_eq!(DepthSample::from_elevation(120.0), DepthSample::Known(0.0));
        assert_eq!(DepthSample::from_elevation(f64::NAN), DepthSample::Unknown);
        assert_eq!(DepthSample::Unknown.meters(), None);
    }

    #[test]
    fn grid_cell_has_eight_distinct_neighbours() {
        let cell = GridCell::new(3, -2);
        let neighbours: Vec<GridCell> = cell.neighbours().collect();
        assert_eq!(neighbours.len(), 8);
        assert!(!neighbours.contains(&cell));
        for n in &neighbours {
            assert!((n.row - cell.row).abs() <= 1 && (n.col - cell.col).abs() <= 1);
        }
        assert!(cell.is_diagonal_to(GridCell::new(4, -1)));
        assert!(!cell.is_diagonal_to(GridCell::new(4, -2)));
    }

    #[test]
    fn status_ordering_picks_most_degraded() {
        assert_eq!(
            RouteStatus::Clean.worst(RouteStatus::SubstitutedEndpoint),
            RouteStatus::SubstitutedEndpoint
        );
        assert_eq!(
            RouteStatus::DegradedStraightLine.worst(RouteStatus::SubstitutedEndpoint),
            RouteStatus::DegradedStraightLine
        );
        assert_eq!(
            RouteStatus::Truncated.worst(RouteStatus::Clean),
            RouteStatus::Truncated
        );
        assert_eq!(
            serde_json::to_string(&RouteStatus::DegradedStraightLine).unwrap(),
            "\"degraded_straight_line\""
        );
    }
}
