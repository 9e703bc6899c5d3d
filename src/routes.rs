//! Top-level router configuration combining API routes, health and static assets.
//!
//! # Route Structure
//!
//! - `/generate`, `/redirect/{id}`, `/links/*` - JSON API (see [`crate::api::routes`])
//! - `GET /health`     - Health check
//! - `GET /dashboard`  - Dashboard page (`<static_dir>/dashboard.html`)
//! - everything else   - Static files from `static_dir`
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Restricted to the configured origins
//! - **Security headers** - Content-Security-Policy and nosniff
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{cors, security_headers};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::path::Path;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory with the dashboard's HTML, JS and CSS
/// - `allowed_origins` - origins admitted by the CORS policy
pub fn app_router(
    state: AppState,
    static_dir: &str,
    allowed_origins: &[String],
) -> NormalizePath<Router> {
    let static_dir = Path::new(static_dir);

    let router = Router::new()
        .merge(api::routes::routes())
        .route("/health", get(health_handler))
        .route_service("/dashboard", ServeFile::new(static_dir.join("dashboard.html")))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(cors::layer(allowed_origins))
        .layer(security_headers::content_security_policy())
        .layer(security_headers::no_sniff())
        .layer(api::middleware::tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
