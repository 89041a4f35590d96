//! Shared library surface for the route planning server and its tests.

pub mod api;
pub mod config;
pub mod route_planner;
pub mod state;
