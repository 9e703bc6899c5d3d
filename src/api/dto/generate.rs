//! DTOs for the QR generation endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /generate`.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    /// Target URL. Surrounding whitespace is ignored.
    #[validate(required(message = "URL is required"))]
    pub url: Option<String>,
}

/// Response for a generated link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub id: String,
    /// QR image of `dynamic_url` as a `data:` URI.
    pub qr_code: String,
    pub dynamic_url: String,
}
