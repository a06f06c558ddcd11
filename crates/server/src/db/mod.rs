//! Database operations for the Tradepost SQLite store.
//!
//! ## Tables
//!
//! - `users` - Registered users, session tokens, open-cart pointers
//! - `items` - Catalog items
//! - `carts` - Shopping carts (partial unique index: one open cart per user)
//! - `cart_items` - Append-only cart lines
//! - `orders` - Immutable orders, one per checked-out cart
//!
//! # Migrations
//!
//! The single initial migration lives in `crates/server/migrations/` and is
//! embedded via [`MIGRATOR`]; the server runs it at startup.
//!
//! All queries are runtime-checked sqlx; repositories take an injected pool
//! reference so tests can substitute an in-memory database.

pub mod carts;
pub mod items;
pub mod orders;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use carts::CartRepository;
pub use items::ItemRepository;
pub use orders::OrderRepository;
pub use users::UserRepository;

/// Embedded migrations, applied at server startup.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username, second open cart).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if missing. WAL mode and a busy timeout keep
/// concurrent writers from failing fast; the acquire timeout bounds how long
/// a request waits for a connection, so no operation blocks indefinitely.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
