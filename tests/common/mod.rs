#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use qr_link_service::domain::entities::{Link, NewLink};
use qr_link_service::domain::repositories::LinkRepository;
use qr_link_service::infrastructure::persistence::{Database, SqliteLinkRepository};
use qr_link_service::infrastructure::qr::CodeRenderer;
use qr_link_service::state::AppState;

pub const TEST_ORIGIN: &str = "http://s.example.com";

/// Opens a fresh, migrated in-memory database.
pub async fn open_test_db() -> Database {
    Database::open("sqlite::memory:", 1, Duration::from_secs(5))
        .await
        .unwrap()
}

pub fn create_test_repo(db: &Database) -> Arc<SqliteLinkRepository> {
    Arc::new(SqliteLinkRepository::new(db.pool()))
}

pub async fn create_test_link(db: &Database, id: &str, url: &str) -> Link {
    SqliteLinkRepository::new(db.pool())
        .create(NewLink::for_origin(
            id.to_string(),
            url.to_string(),
            TEST_ORIGIN,
        ))
        .await
        .unwrap()
}

pub fn create_test_state(db: Database) -> AppState {
    AppState::new(db, CodeRenderer::default()).with_origin(Some(TEST_ORIGIN.to_string()), false)
}

/// Path to a database file that does not exist yet.
pub fn temp_db_path() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("qr-link-test-{}.db", uuid::Uuid::new_v4()))
}

pub fn remove_db_files(path: &std::path::Path) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.as_os_str().to_owned();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}
