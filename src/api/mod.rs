//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::service::BalanceService;

pub use routes::create_router;

/// Build the full application router
pub fn build_app(service: BalanceService) -> Router {
    let api_router = create_router().layer(axum::middleware::from_fn(
        middleware::logging_middleware,
    ));

    Router::new()
        // Health check
        .route("/health", axum::routing::get(health_check))
        .nest("/api/v1", api_router)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
