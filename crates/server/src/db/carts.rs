//! Cart and cart line repository.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqlitePool;

use tradepost_core::{CartId, CartLineId, CartStatus, ItemId, UserId};

use super::RepositoryError;
use crate::models::{Cart, CartLine};

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user's open cart, if one exists.
    ///
    /// The status filter is what retires checked-out carts: they stop
    /// matching here, so the next add-to-cart opens a fresh cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_open_by_owner(
        &self,
        user_id: UserId,
    ) -> Result<Option<Cart>, RepositoryError> {
        let cart = sqlx::query_as::<_, Cart>(
            "SELECT id, user_id, name, status, created_at \
             FROM carts \
             WHERE user_id = ?1 AND status = ?2",
        )
        .bind(user_id)
        .bind(CartStatus::Open)
        .fetch_optional(self.pool)
        .await?;

        Ok(cart)
    }

    /// Create an open cart for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already has an open
    /// cart (the partial unique index rejects the insert). A caller racing
    /// another first-time add should re-run its open-cart lookup on this
    /// error rather than treat it as fatal.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, user_id: UserId, name: &str) -> Result<Cart, RepositoryError> {
        let created_at = Utc::now();

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO carts (user_id, name, status, created_at) \
             VALUES (?1, ?2, ?3, ?4) \
             RETURNING id",
        )
        .bind(user_id)
        .bind(name)
        .bind(CartStatus::Open)
        .bind(created_at)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("user already has an open cart".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(Cart {
            id: CartId::new(id),
            user_id,
            name: name.to_owned(),
            status: CartStatus::Open,
            created_at,
            lines: Vec::new(),
        })
    }

    /// Append a line to a cart.
    ///
    /// The item id is accepted without verifying it names an existing
    /// catalog item (known, documented gap).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add_line(
        &self,
        cart_id: CartId,
        item_id: ItemId,
    ) -> Result<CartLine, RepositoryError> {
        let created_at = Utc::now();

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO cart_items (cart_id, item_id, created_at) \
             VALUES (?1, ?2, ?3) \
             RETURNING id",
        )
        .bind(cart_id)
        .bind(item_id)
        .bind(created_at)
        .fetch_one(self.pool)
        .await?;

        Ok(CartLine {
            id: CartLineId::new(id),
            cart_id,
            item_id,
            created_at,
        })
    }

    /// Get a cart's lines in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines(&self, cart_id: CartId) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, CartLine>(
            "SELECT id, cart_id, item_id, created_at \
             FROM cart_items \
             WHERE cart_id = ?1 \
             ORDER BY id",
        )
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    /// List all carts with their lines populated.
    ///
    /// Read-only projection: two queries, lines grouped in memory, no
    /// pagination.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn list_with_lines(&self) -> Result<Vec<Cart>, RepositoryError> {
        let mut carts = sqlx::query_as::<_, Cart>(
            "SELECT id, user_id, name, status, created_at \
             FROM carts \
             ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        let lines = sqlx::query_as::<_, CartLine>(
            "SELECT id, cart_id, item_id, created_at \
             FROM cart_items \
             ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        let mut by_cart: HashMap<CartId, Vec<CartLine>> = HashMap::new();
        for line in lines {
            by_cart.entry(line.cart_id).or_default().push(line);
        }

        for cart in &mut carts {
            if let Some(cart_lines) = by_cart.remove(&cart.id) {
                cart.lines = cart_lines;
            }
        }

        Ok(carts)
    }

    /// Get a cart's current status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the cart doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn status(&self, cart_id: CartId) -> Result<CartStatus, RepositoryError> {
        let status = sqlx::query_scalar::<_, CartStatus>(
            "SELECT status FROM carts WHERE id = ?1",
        )
        .bind(cart_id)
        .fetch_optional(self.pool)
        .await?;

        status.ok_or(RepositoryError::NotFound)
    }
}
