//! API routes for the route planning server.

pub mod request_id;
mod routes;

use std::sync::Arc;

use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    routes::create_router()
}

/// The full application: routes, shared state and the HTTP middleware stack.
pub fn app(state: Arc<AppState>) -> Router {
    routes().with_state(state).layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(request_id::ensure_request_id))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

#[cfg(test)]
mod tests;
