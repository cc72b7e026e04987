//! API module
//!
//! HTTP endpoints and middleware.

pub mod middleware;
pub mod routes;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::storage::SharedAccountService;

pub use routes::create_router;

/// Build the full application: account routes, health check, request
/// logging and tracing, bound to the given account service.
pub fn build_app(service: SharedAccountService) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(create_router())
        .fallback(routes::route_not_found)
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
