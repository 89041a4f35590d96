pub mod bathymetry;
pub mod cancel;
pub mod config;
pub mod cost;
pub mod error;
pub mod models;
pub mod navigability;
#[cfg(feature = "netcdf")]
mod netcdf_grid;
pub mod planner;
pub mod ports;
pub mod protected_areas;
pub mod resolver;
pub mod search;
pub mod segmenter;
pub mod spatial;
pub mod summary;

pub use bathymetry::{read_grid, BathymetricField, BathymetryGrid, GridBounds};
pub use cancel::CancelToken;
pub use config::{HeuristicKind, PlannerConfig};
pub use cost::CostModel;
pub use error::{Error, Result};
pub use models::{
    Coordinate, DepthSample, Endpoint, EndpointResolution, GridCell, Route, RouteStatus,
    RouteWarning, SegmentReport,
};
pub use navigability::{Navigability, DEFAULT_MIN_DEPTH_M};
pub use planner::RoutePlanner;
pub use ports::{default_ports, nearest_port, Port};
pub use protected_areas::{
    areas_near, default_protected_areas, AreaProximity, ProtectedArea, Proximity, ProximityRadii,
};
pub use resolver::{NavigablePointResolver, Resolution};
pub use search::{GridAStar, GridFrame, SearchOutcome};
pub use segmenter::{RouteSegmenter, SegmentedPlan};
pub use spatial::haversine_km;
pub use summary::{summarize, RouteSummary, WarningReport};
