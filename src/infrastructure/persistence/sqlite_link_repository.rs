//! SQLite implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::url_validator::validate_url;

const LINK_COLUMNS: &str = "id, original_url, dynamic_url, redirect_count, created_at";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: String,
    original_url: String,
    dynamic_url: String,
    redirect_count: i64,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.original_url,
            r.dynamic_url,
            r.redirect_count,
            r.created_at,
        )
    }
}

/// SQLite repository for link storage and retrieval.
///
/// Every query binds its parameters; no user input is interpolated into SQL.
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLinkRepository {
    /// Creates a new repository over an open connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        if new_link.original_url.trim().is_empty() {
            return Err(AppError::bad_request(
                "Original URL is required",
                json!({ "id": new_link.id }),
            ));
        }

        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "INSERT INTO links (id, original_url, dynamic_url, redirect_count, created_at)
             VALUES (?, ?, ?, 0, ?)
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(&new_link.id)
        .bind(&new_link.original_url)
        .bind(&new_link.dynamic_url)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict { .. } => {
                AppError::conflict("Link id already exists", json!({ "id": new_link.id }))
            }
            other => other,
        })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links
             ORDER BY created_at, rowid
             LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<Link>, AppError> {
        // instr() is case-sensitive and treats the needle literally, unlike LIKE.
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links
             WHERE instr(original_url, ?1) > 0 OR instr(dynamic_url, ?1) > 0
             ORDER BY created_at, rowid"
        ))
        .bind(query)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn update_original_url(
        &self,
        id: &str,
        original_url: &str,
    ) -> Result<Link, AppError> {
        let original_url = validate_url(original_url).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "id": id, "url": original_url }))
        })?;

        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "UPDATE links SET original_url = ? WHERE id = ? RETURNING {LINK_COLUMNS}"
        ))
        .bind(&original_url)
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::from)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = ?")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_redirect_count(&self, id: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "UPDATE links SET redirect_count = redirect_count + 1
             WHERE id = ?
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
