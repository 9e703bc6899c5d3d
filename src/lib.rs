//! # QR Link Service
//!
//! A URL shortening service that pairs every generated redirect URL with a
//! QR code and counts redirects, built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Link entity, repository and renderer traits
//! - **Application Layer** ([`application`]) - Link service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite store, migrations, QR rendering
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://links.db"   # Optional, this is the default
//!
//! # Start the service (migrations run on startup)
//! cargo run
//!
//! curl -X POST localhost:3000/generate -H 'content-type: application/json' \
//!      -d '{"url": "https://example.com"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{GeneratedLink, LinkService};
    pub use crate::domain::entities::{Link, NewLink};
    pub use crate::domain::qr_renderer::QrRenderer;
    pub use crate::domain::repositories::LinkRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{Database, SqliteLinkRepository};
    pub use crate::infrastructure::qr::CodeRenderer;
    pub use crate::state::AppState;
}
