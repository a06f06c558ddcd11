//! Shared helpers for server tests.
//!
//! Tests run against real SQLite databases: an in-memory one for the
//! sequential cases, a temp-file one (multi-connection, WAL) where the test
//! needs genuine concurrency.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::TempDir;

use tradepost_server::db::MIGRATOR;
use tradepost_server::models::User;
use tradepost_server::services::IdentityService;

/// Open a single-connection in-memory database with the schema applied.
///
/// One connection, kept alive for the pool's lifetime: an in-memory SQLite
/// database exists per connection, so a larger pool would see empty
/// databases.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    MIGRATOR.run(&pool).await.unwrap();
    pool
}

/// Open a temp-file database through the production pool settings (multiple
/// connections, WAL, busy timeout), with the schema applied.
pub async fn file_pool(dir: &TempDir) -> SqlitePool {
    let url = format!("sqlite:{}", dir.path().join("test.db").display());
    let pool = tradepost_server::db::create_pool(&url).await.unwrap();

    MIGRATOR.run(&pool).await.unwrap();
    pool
}

/// Register a user and return it.
pub async fn register(pool: &SqlitePool, username: &str, password: &str) -> User {
    IdentityService::new(pool)
        .register(username, password)
        .await
        .unwrap()
}

/// Count a user's open carts.
pub async fn open_cart_count(pool: &SqlitePool, user: &User) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM carts WHERE user_id = ?1 AND status = 'open'",
    )
    .bind(user.id)
    .fetch_one(pool)
    .await
    .unwrap()
}
