//! Link generation, resolution and management service.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{Link, NewLink};
use crate::domain::qr_renderer::QrRenderer;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::url_validator::validate_url;

/// Default page size for link listings.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page a caller may request.
pub const MAX_LIMIT: i64 = 1000;

/// Result of a successful generate call.
#[derive(Debug, Clone)]
pub struct GeneratedLink {
    pub link: Link,
    /// QR image of `link.dynamic_url` as a `data:` URI.
    pub qr_code: String,
}

/// Service for creating, resolving and managing links.
///
/// Validates input before any mutation reaches the repository and pairs each
/// new link with a QR image of its dynamic URL.
pub struct LinkService<L: LinkRepository, Q: QrRenderer> {
    link_repository: Arc<L>,
    renderer: Arc<Q>,
}

impl<L: LinkRepository, Q: QrRenderer> LinkService<L, Q> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, renderer: Arc<Q>) -> Self {
        Self {
            link_repository,
            renderer,
        }
    }

    /// Stores a new link for `raw_url` and renders its QR code.
    ///
    /// The dynamic URL is `<origin>/redirect/<id>` with a fresh UUID v4 id.
    ///
    /// # Render failures
    ///
    /// The link is stored before rendering. If rendering fails, the stored
    /// link is deleted again so no record exists without a QR code having
    /// been returned for it. A failed cleanup is logged; the render error is
    /// returned either way.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the trimmed URL is not absolute.
    /// Returns [`AppError::Render`] if the QR image cannot be produced.
    /// Returns [`AppError::Store`] or [`AppError::Conflict`] from the repository.
    pub async fn generate(&self, raw_url: &str, origin: &str) -> Result<GeneratedLink, AppError> {
        let original_url = validate_url(raw_url).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "url": raw_url.trim() }))
        })?;

        let id = Uuid::new_v4().to_string();
        let link = self
            .link_repository
            .create(NewLink::for_origin(id, original_url, origin))
            .await?;

        tracing::info!(id = %link.id, dynamic_url = %link.dynamic_url, "Generated dynamic URL");

        match self.renderer.render_data_uri(&link.dynamic_url) {
            Ok(qr_code) => Ok(GeneratedLink { link, qr_code }),
            Err(render_error) => {
                if let Err(e) = self.link_repository.delete(&link.id).await {
                    tracing::warn!(id = %link.id, error = %e, "Failed to remove link after render failure");
                }

                Err(AppError::render(
                    "Error generating QR code",
                    json!({ "reason": render_error.to_string() }),
                ))
            }
        }
    }

    /// Returns the original URL for `id`, counting the visit.
    ///
    /// The lookup and the increment are one atomic store operation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn resolve(&self, id: &str) -> Result<String, AppError> {
        let link = self
            .link_repository
            .increment_redirect_count(id)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "id": id })))?;

        tracing::debug!(id, target = %link.original_url, count = link.redirect_count, "Redirecting");

        Ok(link.original_url)
    }

    /// Retrieves a link by id without counting a visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get_link(&self, id: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
    }

    /// Lists links in insertion order.
    ///
    /// `limit` defaults to [`DEFAULT_LIMIT`] and `offset` to 0. An offset past
    /// the last link yields an empty page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `limit` is outside `1..=MAX_LIMIT`
    /// or `offset` is negative.
    pub async fn list_page(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Link>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let offset = offset.unwrap_or(0);

        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(AppError::bad_request(
                format!("Limit must be between 1 and {MAX_LIMIT}"),
                json!({ "limit": limit }),
            ));
        }
        if offset < 0 {
            return Err(AppError::bad_request(
                "Offset must not be negative",
                json!({ "offset": offset }),
            ));
        }

        self.link_repository.list(limit, offset).await
    }

    /// Finds links whose original or dynamic URL contains `query` (case-sensitive).
    pub async fn search_by_query(&self, query: &str) -> Result<Vec<Link>, AppError> {
        self.link_repository.search(query).await
    }

    /// Points an existing link at a new target.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the trimmed URL is not absolute.
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn update_original_url(&self, id: &str, new_url: &str) -> Result<Link, AppError> {
        let original_url = validate_url(new_url).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "id": id, "url": new_url.trim() }))
        })?;

        let link = self
            .link_repository
            .update_original_url(id, &original_url)
            .await?;

        tracing::info!(id, original_url = %link.original_url, "Link updated");

        Ok(link)
    }

    /// Deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id, including when
    /// it was already deleted.
    pub async fn delete_link(&self, id: &str) -> Result<(), AppError> {
        if !self.link_repository.delete(id).await? {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        }

        tracing::info!(id, "Link deleted");
        Ok(())
    }

    /// Counts stored links.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::qr_renderer::{MockQrRenderer, RenderError};
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    const ORIGIN: &str = "http://host";

    fn create_test_link(id: &str, url: &str, count: i64) -> Link {
        Link::new(
            id.to_string(),
            url.to_string(),
            format!("{ORIGIN}/redirect/{id}"),
            count,
            Utc::now(),
        )
    }

    fn echo_create(new_link: NewLink) -> Result<Link, AppError> {
        Ok(Link::new(
            new_link.id,
            new_link.original_url,
            new_link.dynamic_url,
            0,
            Utc::now(),
        ))
    }

    fn service(
        repo: MockLinkRepository,
        renderer: MockQrRenderer,
    ) -> LinkService<MockLinkRepository, MockQrRenderer> {
        LinkService::new(Arc::new(repo), Arc::new(renderer))
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mut repo = MockLinkRepository::new();
        let mut renderer = MockQrRenderer::new();

        repo.expect_create()
            .withf(|new_link| {
                new_link.original_url == "https://example.com"
                    && new_link.dynamic_url == format!("{ORIGIN}/redirect/{}", new_link.id)
                    && Uuid::parse_str(&new_link.id).is_ok()
            })
            .times(1)
            .returning(echo_create);

        renderer
            .expect_render_data_uri()
            .withf(|text| text.starts_with("http://host/redirect/"))
            .times(1)
            .returning(|_| Ok("data:image/png;base64,AAAA".to_string()));

        let result = service(repo, renderer)
            .generate("  https://example.com \n", ORIGIN)
            .await
            .unwrap();

        assert_eq!(result.link.original_url, "https://example.com");
        assert_eq!(result.link.redirect_count, 0);
        assert_eq!(result.qr_code, "data:image/png;base64,AAAA");
    }

    #[tokio::test]
    async fn test_generate_trims_origin_slash() {
        let mut repo = MockLinkRepository::new();
        let mut renderer = MockQrRenderer::new();

        repo.expect_create()
            .withf(|new_link| new_link.dynamic_url == format!("http://host/redirect/{}", new_link.id))
            .times(1)
            .returning(echo_create);
        renderer
            .expect_render_data_uri()
            .returning(|_| Ok("data:".to_string()));

        let result = service(repo, renderer)
            .generate("https://example.com", "http://host/")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_generate_invalid_url_creates_nothing() {
        for input in ["", "   ", "example.com", "not a url", "mailto:a@b.c"] {
            let mut repo = MockLinkRepository::new();
            let mut renderer = MockQrRenderer::new();
            repo.expect_create().times(0);
            renderer.expect_render_data_uri().times(0);

            let result = service(repo, renderer).generate(input, ORIGIN).await;

            assert!(
                matches!(result, Err(AppError::Validation { .. })),
                "expected validation error for {input:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_generate_render_failure_removes_link() {
        let mut repo = MockLinkRepository::new();
        let mut renderer = MockQrRenderer::new();

        repo.expect_create().times(1).returning(echo_create);
        repo.expect_delete().times(1).returning(|_| Ok(true));
        renderer
            .expect_render_data_uri()
            .times(1)
            .returning(|_| Err(RenderError::Encode("data too long".to_string())));

        let result = service(repo, renderer)
            .generate("https://example.com", ORIGIN)
            .await;

        assert!(matches!(result, Err(AppError::Render { .. })));
    }

    #[tokio::test]
    async fn test_generate_render_failure_reported_even_if_cleanup_fails() {
        let mut repo = MockLinkRepository::new();
        let mut renderer = MockQrRenderer::new();

        repo.expect_create().times(1).returning(echo_create);
        repo.expect_delete()
            .times(1)
            .returning(|_| Err(AppError::store("Database error", json!({}))));
        renderer
            .expect_render_data_uri()
            .returning(|_| Err(RenderError::Image("boom".to_string())));

        let result = service(repo, renderer)
            .generate("https://example.com", ORIGIN)
            .await;

        assert!(matches!(result, Err(AppError::Render { .. })));
    }

    #[tokio::test]
    async fn test_generate_store_failure_skips_render() {
        let mut repo = MockLinkRepository::new();
        let mut renderer = MockQrRenderer::new();

        repo.expect_create()
            .times(1)
            .returning(|_| Err(AppError::store("Database error", json!({}))));
        renderer.expect_render_data_uri().times(0);

        let result = service(repo, renderer)
            .generate("https://example.com", ORIGIN)
            .await;

        assert!(matches!(result, Err(AppError::Store { .. })));
    }

    #[tokio::test]
    async fn test_resolve_increments_and_returns_target() {
        let mut repo = MockLinkRepository::new();
        repo.expect_increment_redirect_count()
            .withf(|id| id == "abc123")
            .times(1)
            .returning(|id| Ok(Some(create_test_link(id, "https://example.com", 1))));

        let url = service(repo, MockQrRenderer::new())
            .resolve("abc123")
            .await
            .unwrap();

        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_unknown_id() {
        let mut repo = MockLinkRepository::new();
        repo.expect_increment_redirect_count()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repo, MockQrRenderer::new()).resolve("missing").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_link_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = service(repo, MockQrRenderer::new()).get_link("x").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_page_defaults() {
        let mut repo = MockLinkRepository::new();
        repo.expect_list()
            .withf(|limit, offset| *limit == DEFAULT_LIMIT && *offset == 0)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let links = service(repo, MockQrRenderer::new())
            .list_page(None, None)
            .await
            .unwrap();

        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_list_page_rejects_bad_window() {
        let mut repo = MockLinkRepository::new();
        repo.expect_list().times(0);
        let svc = service(repo, MockQrRenderer::new());

        assert!(matches!(
            svc.list_page(Some(0), None).await,
            Err(AppError::Validation { .. })
        ));
        assert!(matches!(
            svc.list_page(Some(MAX_LIMIT + 1), None).await,
            Err(AppError::Validation { .. })
        ));
        assert!(matches!(
            svc.list_page(None, Some(-1)).await,
            Err(AppError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_search_passes_query_through() {
        let mut repo = MockLinkRepository::new();
        repo.expect_search()
            .withf(|q| q == "Example")
            .times(1)
            .returning(|_| Ok(vec![create_test_link("a", "https://Example.com", 0)]));

        let links = service(repo, MockQrRenderer::new())
            .search_by_query("Example")
            .await
            .unwrap();

        assert_eq!(links.len(), 1);
    }

    #[tokio::test]
    async fn test_update_validates_before_store() {
        let mut repo = MockLinkRepository::new();
        repo.expect_update_original_url().times(0);

        let result = service(repo, MockQrRenderer::new())
            .update_original_url("abc123", "nope")
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_trims_url() {
        let mut repo = MockLinkRepository::new();
        repo.expect_update_original_url()
            .withf(|id, url| id == "abc123" && url == "https://new.example.com")
            .times(1)
            .returning(|id, url| Ok(create_test_link(id, url, 3)));

        let link = service(repo, MockQrRenderer::new())
            .update_original_url("abc123", " https://new.example.com ")
            .await
            .unwrap();

        assert_eq!(link.original_url, "https://new.example.com");
        assert_eq!(link.redirect_count, 3);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(false));

        let result = service(repo, MockQrRenderer::new())
            .delete_link("abc123")
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let mut repo = MockLinkRepository::new();
        repo.expect_delete()
            .withf(|id| id == "abc123")
            .times(1)
            .returning(|_| Ok(true));

        let result = service(repo, MockQrRenderer::new())
            .delete_link("abc123")
            .await;

        assert!(result.is_ok());
    }
}
