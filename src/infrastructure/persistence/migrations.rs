//! Named, append-only schema migrations.
//!
//! Migrations are applied in declaration order. Each one runs at most once:
//! its name is recorded in the `migrations` ledger in the same transaction
//! as its statement, so a crash never leaves a statement applied without its
//! ledger row. New migrations are only ever appended to [`MIGRATIONS`].

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::AppError;

/// A single schema change, identified by a unique name.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub name: &'static str,
    pub sql: &'static str,
}

/// A ledger row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppliedMigration {
    pub name: String,
    pub applied_at: DateTime<Utc>,
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "create_links_table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS links (
                id TEXT PRIMARY KEY,
                original_url TEXT NOT NULL,
                dynamic_url TEXT NOT NULL,
                redirect_count INTEGER NOT NULL DEFAULT 0 CHECK (redirect_count >= 0),
                created_at TEXT NOT NULL
            )
        "#,
    },
    Migration {
        name: "create_links_created_at_index",
        sql: "CREATE INDEX IF NOT EXISTS idx_links_created_at ON links (created_at)",
    },
];

const CREATE_LEDGER: &str = r#"
    CREATE TABLE IF NOT EXISTS migrations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE NOT NULL,
        applied_at TEXT NOT NULL
    )
"#;

/// Applies every migration in [`MIGRATIONS`] that is not yet in the ledger.
///
/// Returns the names of the migrations applied by this call; an empty list
/// means the schema was already current.
///
/// # Errors
///
/// Returns [`AppError::Store`] if the ledger cannot be read or a migration
/// fails. A failed migration is rolled back and later ones are not attempted.
pub async fn run_migrations(pool: &SqlitePool) -> Result<Vec<&'static str>, AppError> {
    apply(pool, MIGRATIONS).await
}

/// Applies `migrations` in order against the ledger.
pub async fn apply(
    pool: &SqlitePool,
    migrations: &[Migration],
) -> Result<Vec<&'static str>, AppError> {
    tracing::info!("Applying database schema migrations");
    sqlx::query(CREATE_LEDGER).execute(pool).await?;

    let mut applied = Vec::new();

    for migration in migrations {
        let already_applied: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM migrations WHERE name = ?")
                .bind(migration.name)
                .fetch_one(pool)
                .await?;

        if already_applied > 0 {
            tracing::debug!(migration = migration.name, "Migration already applied");
            continue;
        }

        let mut tx = pool.begin().await?;

        if let Err(e) = sqlx::query(migration.sql).execute(&mut *tx).await {
            tracing::error!(migration = migration.name, error = %e, "Migration failed");
            return Err(AppError::store(
                format!("Migration {} failed", migration.name),
                serde_json::json!({ "migration": migration.name, "reason": e.to_string() }),
            ));
        }

        sqlx::query("INSERT INTO migrations (name, applied_at) VALUES (?, ?)")
            .bind(migration.name)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(migration = migration.name, "Migration applied");
        applied.push(migration.name);
    }

    Ok(applied)
}

/// Lists ledger rows in application order.
pub async fn applied_migrations(pool: &SqlitePool) -> Result<Vec<AppliedMigration>, AppError> {
    let rows = sqlx::query_as::<_, AppliedMigration>(
        "SELECT name, applied_at FROM migrations ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
