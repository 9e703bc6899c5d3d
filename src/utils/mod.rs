//! Utility functions for URL validation and request handling.
//!
//! - [`url_validator`] - Target URL validation
//! - [`request_origin`] - Request origin extraction from HTTP headers

pub mod request_origin;
pub mod url_validator;
