//! Shared application state.

use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use searoute_core::{
    default_ports, default_protected_areas, BathymetricField, Port, ProtectedArea, RoutePlanner,
};

use crate::config::Config;

#[derive(Debug)]
pub struct AppState {
    planner: Arc<RoutePlanner>,
    ports: Vec<Port>,
    protected_areas: Vec<ProtectedArea>,
    config: Config,
    started_at: DateTime<Utc>,
}

impl AppState {
    /// Build the planner around an already loaded field.
    ///
    /// Ports are always available for lookups; the planner only snaps
    /// endpoints to them when `port_fallback` is set.
    pub fn from_field(field: BathymetricField, config: Config) -> anyhow::Result<Self> {
        let ports = default_ports();
        let mut planner = RoutePlanner::new(Arc::new(field), config.planner_config())
            .context("invalid planner configuration")?;
        if config.port_fallback {
            planner = planner.with_ports(ports.clone());
        }
        Ok(Self {
            planner: Arc::new(planner),
            ports,
            protected_areas: default_protected_areas(),
            config,
            started_at: Utc::now(),
        })
    }

    /// Load the dataset off the async runtime and build the planner.
    ///
    /// A missing or corrupt dataset is not an error: the planner starts in
    /// degraded mode.
    pub async fn load(config: Config) -> anyhow::Result<Self> {
        let path = config.dataset_path.clone();
        let field = tokio::task::spawn_blocking(move || BathymetricField::load(path))
            .await
            .context("dataset loading task failed")?;
        Self::from_field(field, config)
    }

    pub fn planner(&self) -> &Arc<RoutePlanner> {
        &self.planner
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn protected_areas(&self) -> &[ProtectedArea] {
        &self.protected_areas
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
