//! API route configuration.

use crate::api::handlers::{
    delete_link_handler, generate_handler, get_link_handler, list_links_handler,
    redirect_handler, search_links_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link generation, redirect and management routes.
///
/// # Endpoints
///
/// - `POST   /generate`        - Store a link and return its QR code
/// - `GET    /redirect/{id}`   - 302 to the original URL, counting the visit
/// - `GET    /links`           - List links (`limit`, `offset`)
/// - `GET    /links/search`    - Substring search (`query`)
/// - `GET    /links/{id}`      - Show a single link
/// - `PUT    /links/{id}`      - Replace the original URL
/// - `DELETE /links/{id}`      - Remove a link
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_handler))
        .route("/redirect/{id}", get(redirect_handler))
        .route("/links", get(list_links_handler))
        .route("/links/search", get(search_links_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
}
