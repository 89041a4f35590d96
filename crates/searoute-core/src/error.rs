//! Error type shared by the route planning core.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the planning core.
pub type Result<T> = std::result::Result<T, Error>;

/// Precondition and dataset errors.
///
/// Runtime degradations (missing depth data, unreachable endpoints, exhausted
/// searches) are not errors; they surface as [`crate::RouteWarning`]s on an
/// otherwise usable route.
#[derive(Debug, Error)]
pub enum Error {
    /// Latitude or longitude outside the valid range, or not finite.
    #[error("invalid coordinate ({lat}, {lon}): latitude must be within [-90, 90] and longitude within [-180, 180]")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// Raised when a `LAT,LON` string cannot be parsed.
    #[error("could not parse coordinate from '{input}'; expected 'LAT,LON'")]
    CoordinateParse { input: String },

    /// The dataset file could not be read.
    #[error("failed to read bathymetry dataset at {path}")]
    DatasetIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset file was read but its contents are unusable.
    #[error("malformed bathymetry dataset at {path}: {message}")]
    DatasetFormat { path: PathBuf, message: String },

    /// No parser is registered for the file extension.
    #[error("unsupported bathymetry dataset format for {path}; expected .json, .asc or .nc (with the netcdf feature)")]
    UnsupportedDatasetFormat { path: PathBuf },

    /// Axes and samples do not describe a regular grid.
    #[error("invalid bathymetry grid: {0}")]
    InvalidGrid(String),

    /// A planner parameter is out of range.
    #[error("invalid planner configuration: {field} {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },
}
