//! Validation of user-supplied target URLs.
//!
//! Targets are stored exactly as submitted (after trimming surrounding
//! whitespace) so that a redirect returns the URL the client gave us.

use url::Url;

/// Reasons a target URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL is required")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must include a host")]
    MissingHost,
}

/// Trims `input` and checks that it is an absolute URL with a scheme and a host.
///
/// Returns the trimmed URL unchanged on success.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_url("  https://example.com/a ").unwrap(), "https://example.com/a");
/// assert!(validate_url("example.com").is_err());
/// assert!(validate_url("mailto:someone@example.com").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
