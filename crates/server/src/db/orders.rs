//! Order repository, including the checkout transaction.

use chrono::Utc;
use sqlx::SqlitePool;

use tradepost_core::{CartId, CartStatus, OrderId, UserId};

use super::RepositoryError;
use crate::models::Order;

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Check out a cart: create its order and flip its status, atomically.
    ///
    /// One transaction covers the owner/status check, the order insert, and
    /// the status flip. If any step fails the transaction rolls back and the
    /// cart stays open; an order can never exist for a cart that is still
    /// open, nor can a cart be closed without its order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no cart matches id + owner +
    /// open status. The three cases are deliberately indistinguishable so
    /// callers can't probe for other users' carts.
    /// Returns `RepositoryError::DataCorruption` if the cart changes state
    /// between the check and the flip inside the transaction.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn checkout_cart(
        &self,
        user_id: UserId,
        cart_id: CartId,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let cart = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM carts \
             WHERE id = ?1 AND user_id = ?2 AND status = ?3",
        )
        .bind(cart_id)
        .bind(user_id)
        .bind(CartStatus::Open)
        .fetch_optional(&mut *tx)
        .await?;

        if cart.is_none() {
            return Err(RepositoryError::NotFound);
        }

        let created_at = Utc::now();
        let order_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO orders (cart_id, user_id, created_at) \
             VALUES (?1, ?2, ?3) \
             RETURNING id",
        )
        .bind(cart_id)
        .bind(user_id)
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await?;

        let flipped = sqlx::query("UPDATE carts SET status = ?1 WHERE id = ?2 AND status = ?3")
            .bind(CartStatus::CheckedOut)
            .bind(cart_id)
            .bind(CartStatus::Open)
            .execute(&mut *tx)
            .await?;

        if flipped.rows_affected() != 1 {
            // The cart was re-read inside this transaction, so this can only
            // mean the store is inconsistent. Roll back and surface it.
            return Err(RepositoryError::DataCorruption(format!(
                "cart {cart_id} changed state during checkout"
            )));
        }

        tx.commit().await?;

        Ok(Order {
            id: OrderId::new(order_id),
            cart_id,
            user_id,
            created_at,
        })
    }

    /// List a user's orders in store order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_owner(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, cart_id, user_id, created_at \
             FROM orders \
             WHERE user_id = ?1 \
             ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Count the orders referencing a cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_cart(&self, cart_id: CartId) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM orders WHERE cart_id = ?1",
        )
        .bind(cart_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}
