//! Sea route planning server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use searoute_server::{api, config::Config, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(config.log_json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!config.log_json).then(tracing_subscriber::fmt::layer))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("searoute_server=debug".parse()?)
                .add_directive("searoute_core=info".parse()?),
        )
        .init();

    tracing::info!("Starting sea route server...");

    let port = config.server_port;
    let state = Arc::new(AppState::load(config).await?);
    if let Some(reason) = state.planner().field().load_error() {
        tracing::warn!("Serving degraded straight-line routes: {}", reason);
    }

    let app = api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
