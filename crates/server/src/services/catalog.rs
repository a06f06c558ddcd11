//! Catalog service: item creation and listing.

use sqlx::SqlitePool;
use thiserror::Error;

use tradepost_core::ItemStatus;

use crate::db::{ItemRepository, RepositoryError};
use crate::models::Item;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Item name missing from the request.
    #[error("name is required")]
    MissingName,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Catalog service.
///
/// Items have no lifecycle: created once, listed, never updated or deleted.
pub struct CatalogService<'a> {
    items: ItemRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            items: ItemRepository::new(pool),
        }
    }

    /// Create a catalog item. Names are not unique.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MissingName` if the name is empty.
    pub async fn create(&self, name: &str, status: ItemStatus) -> Result<Item, CatalogError> {
        if name.is_empty() {
            return Err(CatalogError::MissingName);
        }

        Ok(self.items.create(name, status).await?)
    }

    /// List all catalog items.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the query fails.
    pub async fn list(&self) -> Result<Vec<Item>, CatalogError> {
        Ok(self.items.list().await?)
    }
}
