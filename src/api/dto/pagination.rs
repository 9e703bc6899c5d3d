//! Query parameters for link listing and search.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

/// `limit` / `offset` window for `GET /links`.
///
/// Both are optional; defaults and bounds are applied by the link service.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Substring filter for `GET /links/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}
