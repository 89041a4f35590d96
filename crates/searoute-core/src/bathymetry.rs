//! Bathymetric grid storage, dataset readers and depth sampling.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Coordinate, DepthSample};

/// Lat/lon bounding box of a grid, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GridBounds {
    pub fn contains(&self, coord: Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coord.lat())
            && (self.min_lon..=self.max_lon).contains(&coord.lon())
    }
}

/// Seabed elevation samples on a rectilinear lat/lon grid.
///
/// Elevations are meters, negative below sea level, stored row-major with one
/// row per latitude. Axes are always ascending after construction. Missing
/// samples are `NaN`.
#[derive(Debug, Clone)]
pub struct BathymetryGrid {
    lats: Vec<f64>,
    lons: Vec<f64>,
    elevations_m: Vec<f64>,
}

impl BathymetryGrid {
    pub fn new(mut lats: Vec<f64>, mut lons: Vec<f64>, mut elevations_m: Vec<f64>) -> Result<Self> {
        if lats.is_empty() || lons.is_empty() {
            return Err(Error::InvalidGrid("latitude and longitude axes must not be empty".into()));
        }
        if elevations_m.len() != lats.len() * lons.len() {
            return Err(Error::InvalidGrid(format!(
                "expected {} x {} = {} samples, found {}",
                lats.len(),
                lons.len(),
                lats.len() * lons.len(),
                elevations_m.len()
            )));
        }
        if lats.iter().chain(lons.iter()).any(|v| !v.is_finite()) {
            return Err(Error::InvalidGrid("axis values must be finite".into()));
        }

        let cols = lons.len();
        if lats.len() > 1 && lats[0] > lats[lats.len() - 1] {
            lats.reverse();
            let mut flipped = Vec::with_capacity(elevations_m.len());
            for row in elevations_m.chunks(cols).rev() {
                flipped.extend_from_slice(row);
            }
            elevations_m = flipped;
        }
        if cols > 1 && lons[0] > lons[cols - 1] {
            lons.reverse();
            for row in elevations_m.chunks_mut(cols) {
                row.reverse();
            }
        }

        if !strictly_ascending(&lats) {
            return Err(Error::InvalidGrid("latitude axis is not monotonic".into()));
        }
        if !strictly_ascending(&lons) {
            return Err(Error::InvalidGrid("longitude axis is not monotonic".into()));
        }

        Ok(Self {
            lats,
            lons,
            elevations_m,
        })
    }

    /// Build a regular grid, calling `elevation(row, col)` for each sample.
    /// Row 0 is the southernmost latitude, column 0 the westernmost longitude.
    pub fn regular<F>(
        min_lat: f64,
        min_lon: f64,
        step_deg: f64,
        rows: usize,
        cols: usize,
        elevation: F,
    ) -> Result<Self>
    where
        F: Fn(usize, usize) -> f64,
    {
        if !(step_deg.is_finite() && step_deg > 0.0) {
            return Err(Error::InvalidGrid("grid step must be positive".into()));
        }
        let samples = rows
            .checked_mul(cols)
            .ok_or_else(|| Error::InvalidGrid(format!("{} x {} samples overflow", rows, cols)))?;
        let lats = (0..rows).map(|r| min_lat + r as f64 * step_deg).collect();
        let lons = (0..cols).map(|c| min_lon + c as f64 * step_deg).collect();
        let mut elevations_m = Vec::with_capacity(samples);
        for row in 0..rows {
            for col in 0..cols {
                elevations_m.push(elevation(row, col));
            }
        }
        Self::new(lats, lons, elevations_m)
    }

    pub fn rows(&self) -> usize {
        self.lats.len()
    }

    pub fn cols(&self) -> usize {
        self.lons.len()
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds {
            min_lat: self.lats[0],
            max_lat: self.lats[self.lats.len() - 1],
            min_lon: self.lons[0],
            max_lon: self.lons[self.lons.len() - 1],
        }
    }

    /// Nearest-neighbour elevation; `None` outside the grid or for a missing sample.
    pub fn elevation_at(&self, lat: f64, lon: f64) -> Option<f64> {
        if !self.bounds().contains(Coordinate::new(lat, lon).ok()?) {
            return None;
        }
        let row = nearest_index(&self.lats, lat);
        let col = nearest_index(&self.lons, lon);
        self.elevations_m
            .get(row * self.cols() + col)
            .copied()
            .filter(|v| v.is_finite())
    }
}

fn strictly_ascending(axis: &[f64]) -> bool {
    axis.windows(2).all(|pair| pair[0] < pair[1])
}

fn nearest_index(axis: &[f64], value: f64) -> usize {
    let upper = axis.partition_point(|&v| v < value);
    if upper == 0 {
        return 0;
    }
    if upper >= axis.len() {
        return axis.len() - 1;
    }
    if (value - axis[upper - 1]) <= (axis[upper] - value) {
        upper - 1
    } else {
        upper
    }
}

/// Process-wide, read-only depth source.
///
/// A field whose dataset failed to load stays degraded for its whole
/// lifetime: every lookup answers [`DepthSample::Unknown`] and no I/O is retried.
#[derive(Debug)]
pub struct BathymetricField {
    grid: Option<BathymetryGrid>,
    source: Option<PathBuf>,
    load_error: Option<String>,
}

impl BathymetricField {
    pub fn from_grid(grid: BathymetryGrid) -> Self {
        Self {
            grid: Some(grid),
            source: None,
            load_error: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            grid: None,
            source: None,
            load_error: Some(reason.into()),
        }
    }

    /// Load a dataset file. Failures leave the field in degraded mode.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match read_grid(path) {
            Ok(grid) => {
                let bounds = grid.bounds();
                tracing::info!(
                    path = %path.display(),
                    rows = grid.rows(),
                    cols = grid.cols(),
                    min_lat = bounds.min_lat,
                    max_lat = bounds.max_lat,
                    min_lon = bounds.min_lon,
                    max_lon = bounds.max_lon,
                    "Loaded bathymetry dataset"
                );
                Self {
                    grid: Some(grid),
                    source: Some(path.to_path_buf()),
                    load_error: None,
                }
            }
            Err(err) => {
                tracing::warn!(
                    "Bathymetry dataset unavailable, routes will be straight lines: {}",
                    err
                );
                Self {
                    grid: None,
                    source: Some(path.to_path_buf()),
                    load_error: Some(err.to_string()),
                }
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.grid.is_none()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn grid(&self) -> Option<&BathymetryGrid> {
        self.grid.as_ref()
    }

    pub fn bounds(&self) -> Option<GridBounds> {
        self.grid.as_ref().map(BathymetryGrid::bounds)
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.bounds().is_some_and(|b| b.contains(coord))
    }

    pub fn depth_at(&self, coord: Coordinate) -> DepthSample {
        self.grid
            .as_ref()
            .and_then(|grid| grid.elevation_at(coord.lat(), coord.lon()))
            .map_or(DepthSample::Unknown, DepthSample::from_elevation)
    }
}

/// Read a dataset file, choosing the parser from the extension.
pub fn read_grid(path: &Path) -> Result<BathymetryGrid> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let parse: fn(&Path, &str) -> Result<BathymetryGrid> = match extension.as_deref() {
        Some("json") => parse_json_grid,
        Some("asc") => parse_ascii_grid,
        #[cfg(feature = "netcdf")]
        Some("nc" | "nc4") => return crate::netcdf_grid::read_netcdf_grid(path),
        _ => {
            return Err(Error::UnsupportedDatasetFormat {
                path: path.to_path_buf(),
            })
        }
    };
    let text = fs::read_to_string(path).map_err(|source| Error::DatasetIo {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, &text)
}

#[derive(Debug, Deserialize)]
struct GridDocument {
    #[serde(alias = "latitude")]
    lat: Vec<f64>,
    #[serde(alias = "longitude")]
    lon: Vec<f64>,
    elevation: Vec<Vec<Option<f64>>>,
}

pub(crate) fn format_error(path: &Path, message: impl Into<String>) -> Error {
    Error::DatasetFormat {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

fn parse_json_grid(path: &Path, text: &str) -> Result<BathymetryGrid> {
    let doc: GridDocument =
        serde_json::from_str(text).map_err(|err| format_error(path, err.to_string()))?;
    if doc.elevation.len() != doc.lat.len() {
        return Err(format_error(
            path,
            format!(
                "{} elevation rows for {} latitudes",
                doc.elevation.len(),
                doc.lat.len()
            ),
        ));
    }
    if let Some((i, row)) = doc
        .elevation
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != doc.lon.len())
    {
        return Err(format_error(
            path,
            format!("row {} has {} samples, expected {}", i, row.len(), doc.lon.len()),
        ));
    }
    let elevations = doc
        .elevation
        .iter()
        .flatten()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect();
    BathymetryGrid::new(doc.lat, doc.lon, elevations)
}

/// `ncols`/`nrows` must be whole, positive and at most `u32::MAX`.
fn grid_dimension(path: &Path, key: &str, number: f64) -> Result<usize> {
    if number.fract() != 0.0 || !(1.0..=u32::MAX as f64).contains(&number) {
        return Err(format_error(
            path,
            format!("header '{}' must be a positive whole number, got {}", key, number),
        ));
    }
    usize::try_from(number as u64)
        .map_err(|_| format_error(path, format!("header '{}' is too large", key)))
}

/// Esri ASCII raster: a key/value header followed by rows from north to south.
fn parse_ascii_grid(path: &Path, text: &str) -> Result<BathymetryGrid> {
    let mut ncols: Option<usize> = None;
    let mut nrows: Option<usize> = None;
    let mut x_origin: Option<(f64, bool)> = None;
    let mut y_origin: Option<(f64, bool)> = None;
    let mut cellsize: Option<f64> = None;
    let mut nodata: Option<f64> = None;

    let mut lines = text.lines().filter(|l| !l.trim().is_empty()).peekable();
    while let Some(&line) = lines.peek() {
        let mut parts = line.split_whitespace();
        let key = match parts.next() {
            Some(key) if key.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) => {
                key.to_ascii_lowercase()
            }
            _ => break,
        };
        let value = parts
            .next()
            .ok_or_else(|| format_error(path, format!("header '{}' has no value", key)))?;
        let number: f64 = value
            .parse()
            .map_err(|_| format_error(path, format!("header '{}' is not numeric", key)))?;
        match key.as_str() {
            "ncols" => ncols = Some(grid_dimension(path, &key, number)?),
            "nrows" => nrows = Some(grid_dimension(path, &key, number)?),
            "xllcorner" => x_origin = Some((number, true)),
            "xllcenter" => x_origin = Some((number, false)),
            "yllcorner" => y_origin = Some((number, true)),
            "yllcenter" => y_origin = Some((number, false)),
            "cellsize" => cellsize = Some(number),
            "nodata_value" => nodata = Some(number),
            other => return Err(format_error(path, format!("unknown header '{}'", other))),
        }
        lines.next();
    }

    let missing = |name: &str| format_error(path, format!("missing header '{}'", name));
    let ncols = ncols.ok_or_else(|| missing("ncols"))?;
    let nrows = nrows.ok_or_else(|| missing("nrows"))?;
    let (x0, x_corner) = x_origin.ok_or_else(|| missing("xllcorner"))?;
    let (y0, y_corner) = y_origin.ok_or_else(|| missing("yllcorner"))?;
    let cellsize = cellsize.ok_or_else(|| missing("cellsize"))?;
    if !(cellsize.is_finite() && cellsize > 0.0) {
        return Err(format_error(path, "cellsize must be positive"));
    }

    let expected = nrows
        .checked_mul(ncols)
        .ok_or_else(|| format_error(path, format!("{} x {} samples overflow", nrows, ncols)))?;

    let mut values = Vec::new();
    for line in lines {
        for token in line.split_whitespace() {
            let v: f64 = token
                .parse()
                .map_err(|_| format_error(path, format!("bad sample '{}'", token)))?;
            values.push(match nodata {
                Some(nd) if v == nd => f64::NAN,
                _ => v,
            });
        }
    }
    if values.len() != expected {
        return Err(format_error(
            path,
            format!("expected {} samples, found {}", expected, values.len()),
        ));
    }

    let half = cellsize / 2.0;
    let west = if x_corner { x0 + half } else { x0 };
    let south = if y_corner { y0 + half } else { y0 };
    // First data row is the northernmost; the grid constructor flips it.
    let lats = (0..nrows)
        .map(|r| south + (nrows - 1 - r) as f64 * cellsize)
        .collect();
    let lons = (0..ncols).map(|c| west + c as f64 * cellsize).collect();
    BathymetryGrid::new(lats, lons, values)
}
