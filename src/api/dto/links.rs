//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// JSON representation of a stored link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: String,
    pub original_url: String,
    pub dynamic_url: String,
    pub redirect_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            dynamic_url: link.dynamic_url,
            redirect_count: link.redirect_count,
            created_at: link.created_at,
        }
    }
}

/// Request body for `PUT /links/{id}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLinkRequest {
    /// New target URL for the link.
    #[validate(required(message = "Original URL is required"))]
    pub original_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLinkResponse {
    pub success: bool,
    pub id: String,
    pub original_url: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub success: bool,
    pub id: String,
}
