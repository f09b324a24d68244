//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

use axum::{middleware::from_fn, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::store::AccountStore;

pub use routes::create_router;

/// Build the application router
///
/// Bank endpoints live under `/bank/rest`; `/health` sits outside it.
pub fn build_router(store: AccountStore) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        .nest("/bank/rest", create_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(middleware::logging_middleware)),
        )
        .with_state(store)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
