//! Handler for link and QR code generation.

use axum::{Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::api::dto::generate::{GenerateRequest, GenerateResponse};
use crate::api::extract::AppJson;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin::resolve_request_origin;

/// Stores a new link and returns its redirect URL with a QR code.
///
/// # Endpoint
///
/// `POST /generate`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": "0b6f0c5e-6a8e-4c59-9d43-2f8f5b0c8a11",
///   "qrCode": "data:image/png;base64,iVBORw0KGgo...",
///   "dynamicUrl": "http://localhost:3000/redirect/0b6f0c5e-6a8e-4c59-9d43-2f8f5b0c8a11"
/// }
/// ```
///
/// The origin of `dynamicUrl` comes from the configured public base URL or
/// the request's `Host` header (see [`resolve_request_origin`]).
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is missing or malformed.
/// Returns 500 Internal Server Error if rendering or storage fails.
pub async fn generate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    payload.validate()?;
    let url = payload.url.unwrap_or_default();

    let origin = resolve_request_origin(
        &headers,
        state.public_base_url.as_deref(),
        state.behind_proxy,
    )?;

    let generated = state.link_service.generate(&url, &origin).await?;

    Ok(Json(GenerateResponse {
        id: generated.link.id,
        qr_code: generated.qr_code,
        dynamic_url: generated.link.dynamic_url,
    }))
}
