//! Handlers for link management endpoints (list, search, show, update, delete).

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::links::{
    DeleteLinkResponse, LinkResponse, UpdateLinkRequest, UpdateLinkResponse,
};
use crate::api::dto::pagination::{ListParams, SearchParams};
use crate::api::extract::{AppJson, AppQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Lists links in insertion order.
///
/// # Endpoint
///
/// `GET /links?limit=10&offset=0`
///
/// `limit` defaults to 10 (max 1000) and `offset` to 0. An offset past the
/// last link returns an empty array.
///
/// # Errors
///
/// Returns 400 Bad Request for a non-numeric or out-of-range window.
pub async fn list_links_handler(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state
        .link_service
        .list_page(params.limit, params.offset)
        .await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Finds links whose original or dynamic URL contains `query`.
///
/// # Endpoint
///
/// `GET /links/search?query=example`
///
/// Matching is case-sensitive; an empty or missing query returns every link.
pub async fn search_links_handler(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.search_by_query(&params.query).await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Returns a single link without counting a visit.
///
/// # Endpoint
///
/// `GET /links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the id is unknown.
pub async fn get_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&id).await?;
    Ok(Json(link.into()))
}

/// Points a link at a new original URL.
///
/// # Endpoint
///
/// `PUT /links/{id}`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://new-destination.com" }
/// ```
///
/// The id and dynamic URL are unchanged, so existing QR codes keep working.
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is missing or malformed.
/// Returns 404 Not Found if the id is unknown.
pub async fn update_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateLinkRequest>,
) -> Result<Json<UpdateLinkResponse>, AppError> {
    payload.validate()?;
    let original_url = payload.original_url.unwrap_or_default();

    let link = state
        .link_service
        .update_original_url(&id, &original_url)
        .await?;

    Ok(Json(UpdateLinkResponse {
        success: true,
        id: link.id,
        original_url: link.original_url,
    }))
}

/// Permanently removes a link.
///
/// # Endpoint
///
/// `DELETE /links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the id is unknown or was already deleted.
pub async fn delete_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    state.link_service.delete_link(&id).await?;

    Ok(Json(DeleteLinkResponse { success: true, id }))
}
