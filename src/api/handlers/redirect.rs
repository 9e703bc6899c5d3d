//! Handler for dynamic URL redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a dynamic URL to its original target and counts the visit.
///
/// # Endpoint
///
/// `GET /redirect/{id}`
///
/// Responds with `302 Found` and a `Location` header. Targets containing
/// characters that are not valid in a header are sent in their
/// percent-encoded form.
///
/// # Errors
///
/// Returns 404 Not Found if the id is unknown.
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let target = state.link_service.resolve(&id).await?;
    let location = location_header(&target)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

fn location_header(target: &str) -> Result<HeaderValue, AppError> {
    let verbatim = if target.is_ascii() {
        HeaderValue::from_str(target).ok()
    } else {
        None
    };

    verbatim
        .or_else(|| {
            Url::parse(target)
                .ok()
                .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        })
        .ok_or_else(|| {
            AppError::internal(
                "Stored URL cannot be used as a redirect target",
                json!({ "url": target }),
            )
        })
}
