//! NetCDF bathymetry (GEBCO layout: `lat`, `lon` and a 2-D `elevation`).

use std::path::Path;

use crate::bathymetry::{format_error, BathymetryGrid};
use crate::error::Result;

const LAT_NAMES: &[&str] = &["lat", "latitude", "y"];
const LON_NAMES: &[&str] = &["lon", "longitude", "x"];
const ELEVATION_NAMES: &[&str] = &["elevation", "z", "Band1"];

fn find_variable<'f>(file: &'f netcdf::File, names: &[&str]) -> Option<netcdf::Variable<'f>> {
    names.iter().find_map(|name| file.variable(name))
}

/// Checked first so HDF5 does not log lookups of absent attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let value = var.attribute_value(name)?.ok()?;
    f64::try_from(value).ok()
}

fn first_dimension(var: &netcdf::Variable) -> Option<String> {
    var.dimensions().first().map(|dim| dim.name())
}

pub(crate) fn read_netcdf_grid(path: &Path) -> Result<BathymetryGrid> {
    let file = netcdf::open(path)
        .map_err(|err| format_error(path, format!("cannot open NetCDF file: {}", err)))?;

    let lat_var = find_variable(&file, LAT_NAMES)
        .ok_or_else(|| format_error(path, "no latitude variable"))?;
    let lon_var = find_variable(&file, LON_NAMES)
        .ok_or_else(|| format_error(path, "no longitude variable"))?;
    let elevation_var = find_variable(&file, ELEVATION_NAMES)
        .ok_or_else(|| format_error(path, "no elevation variable"))?;

    let read_error = |what: &str, err: netcdf::Error| {
        format_error(path, format!("failed to read {}: {}", what, err))
    };
    let lats: Vec<f64> = lat_var
        .get_values(..)
        .map_err(|err| read_error("latitudes", err))?;
    let lons: Vec<f64> = lon_var
        .get_values(..)
        .map_err(|err| read_error("longitudes", err))?;

    let dims: Vec<String> = elevation_var
        .dimensions()
        .iter()
        .map(|dim| dim.name())
        .collect();
    if dims.len() != 2 {
        return Err(format_error(
            path,
            format!("elevation has {} dimensions, expected 2", dims.len()),
        ));
    }
    let lat_dim = first_dimension(&lat_var);
    let lon_dim = first_dimension(&lon_var);
    let lon_major = lon_dim.as_deref() == Some(dims[0].as_str())
        && lat_dim.as_deref() == Some(dims[1].as_str());

    let raw: Vec<f64> = elevation_var
        .get_values(..)
        .map_err(|err| read_error("elevation", err))?;
    let fill = get_f64_attr(&elevation_var, "_FillValue");
    let scale = get_f64_attr(&elevation_var, "scale_factor").unwrap_or(1.0);
    let offset = get_f64_attr(&elevation_var, "add_offset").unwrap_or(0.0);
    let unpack = |v: f64| {
        if !v.is_finite() || fill == Some(v) {
            f64::NAN
        } else {
            v * scale + offset
        }
    };

    let elevations = if lon_major {
        // stored (lon, lat): transpose into row-per-latitude order
        let rows = lats.len();
        let mut out = Vec::with_capacity(raw.len());
        for r in 0..rows {
            out.extend(
                (0..lons.len())
                    .filter_map(|c| raw.get(c * rows + r))
                    .map(|&v| unpack(v)),
            );
        }
        out
    } else {
        raw.into_iter().map(unpack).collect()
    };

    BathymetryGrid::new(lats, lons, elevations)
}
