//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`   - Short link redirect
//! - `/api/*`         - Link management API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and the tracing layer.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service: [`build_router`] wrapped in
/// trailing-slash normalization, so `/api/links/` and `/api/links` match
/// the same route.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
