//! Repository trait for link record storage.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for link records.
///
/// The repository is the sole owner of link state. Callers only ever see
/// values returned from these operations.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with a redirect count of zero.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `original_url` is empty.
    /// Returns [`AppError::Conflict`] if the id already exists.
    /// Returns [`AppError::Store`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError>;

    /// Lists links in insertion order.
    ///
    /// An `offset` past the end yields an empty list.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Link>, AppError>;

    /// Returns links whose original or dynamic URL contains `query`.
    ///
    /// Matching is case-sensitive. An empty query matches every link.
    async fn search(&self, query: &str) -> Result<Vec<Link>, AppError>;

    /// Replaces the original URL of a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `original_url` is not a well-formed URL.
    /// Returns [`AppError::NotFound`] if no link has this id.
    async fn update_original_url(&self, id: &str, original_url: &str)
    -> Result<Link, AppError>;

    /// Removes a link.
    ///
    /// Returns `Ok(true)` if a link was removed, `Ok(false)` if none had this id.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;

    /// Atomically adds one to the redirect count and returns the updated link.
    ///
    /// Returns `Ok(None)` if no link has this id. Concurrent calls for the same
    /// id never lose an increment.
    async fn increment_redirect_count(&self, id: &str) -> Result<Option<Link>, AppError>;

    /// Counts stored links.
    async fn count(&self) -> Result<i64, AppError>;
}
