//! Link entity representing a generated redirect URL and its target.

use chrono::{DateTime, Utc};

/// A stored link record.
///
/// `id` and `dynamic_url` never change after creation. `original_url` may be
/// replaced through an update, and `redirect_count` only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: String,
    pub original_url: String,
    pub dynamic_url: String,
    pub redirect_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: String,
        original_url: String,
        dynamic_url: String,
        redirect_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            dynamic_url,
            redirect_count,
            created_at,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub id: String,
    pub original_url: String,
    pub dynamic_url: String,
}

impl NewLink {
    /// Builds the record for `id`, deriving the dynamic URL from the request origin.
    pub fn for_origin(id: String, original_url: String, origin: &str) -> Self {
        let dynamic_url = dynamic_url_for(origin, &id);
        Self {
            id,
            original_url,
            dynamic_url,
        }
    }
}

/// Returns `<origin>/redirect/<id>`.
pub fn dynamic_url_for(origin: &str, id: &str) -> String {
    format!("{}/redirect/{}", origin.trim_end_matches('/'), id)
}
