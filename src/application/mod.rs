//! Application layer services implementing business logic.
//!
//! Services consume repository and renderer traits and provide a clean API
//! for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link generation, redirects and management

pub mod services;
