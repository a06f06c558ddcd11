//! Catalog item repository.

use chrono::Utc;
use sqlx::SqlitePool;

use tradepost_core::{ItemId, ItemStatus};

use super::RepositoryError;
use crate::models::Item;

/// Repository for catalog item database operations.
pub struct ItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new catalog item. Item names are not unique.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, name: &str, status: ItemStatus) -> Result<Item, RepositoryError> {
        let created_at = Utc::now();

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO items (name, status, created_at) \
             VALUES (?1, ?2, ?3) \
             RETURNING id",
        )
        .bind(name)
        .bind(status)
        .bind(created_at)
        .fetch_one(self.pool)
        .await?;

        Ok(Item {
            id: ItemId::new(id),
            name: name.to_owned(),
            status,
            created_at,
        })
    }

    /// List all catalog items in store order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Item>, RepositoryError> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, name, status, created_at \
             FROM items \
             ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }
}
