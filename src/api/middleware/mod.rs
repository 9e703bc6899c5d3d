//! HTTP middleware for request processing.
//!
//! Provides observability, cross-origin and security-header layers.

pub mod cors;
pub mod security_headers;
pub mod tracing;
