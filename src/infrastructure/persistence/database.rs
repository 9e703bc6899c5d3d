//! SQLite connection pool with an explicit open/close lifecycle.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::error::AppError;
use crate::infrastructure::persistence::migrations::run_migrations;

/// Time a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the link database.
///
/// Opened once at startup and closed at shutdown. Cloning shares the same pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    /// Opens (creating if missing) the database at `database_url` and applies
    /// pending migrations.
    ///
    /// In-memory databases (`sqlite::memory:`) live as long as their single
    /// connection, so the pool is pinned to one connection that is never
    /// recycled.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the URL is invalid, the file cannot be
    /// opened, or a migration fails.
    pub async fn open(
        database_url: &str,
        max_connections: u32,
        connect_timeout: Duration,
    ) -> Result<Self, AppError> {
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT)
            .foreign_keys(true);

        let options = if in_memory {
            options
        } else {
            options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        };

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options
            .acquire_timeout(connect_timeout)
            .connect_with(options)
            .await?;

        run_migrations(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Shared pool handle for repositories.
    pub fn pool(&self) -> Arc<SqlitePool> {
        self.pool.clone()
    }

    /// Runs a trivial query to confirm the database is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }

    /// Closes every connection. Pending queries complete first; later ones fail.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connections closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}
