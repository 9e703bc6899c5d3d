//! SQLite persistence.
//!
//! - [`Database`] - Connection pool lifecycle (open, ping, close)
//! - [`migrations`] - Named, ledger-tracked schema migrations
//! - [`SqliteLinkRepository`] - Link storage and retrieval

pub mod database;
pub mod migrations;
pub mod sqlite_link_repository;

pub use database::Database;
pub use sqlite_link_repository::SqliteLinkRepository;
