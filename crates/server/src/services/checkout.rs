//! Checkout service: the open -> checked_out transition.

use sqlx::SqlitePool;
use thiserror::Error;

use tradepost_core::CartId;

use crate::db::{OrderRepository, RepositoryError};
use crate::models::{Order, User};

/// Errors that can occur during checkout operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart doesn't exist, isn't the caller's, or isn't open. The three
    /// cases are deliberately collapsed so callers can't learn whether a
    /// cart id belongs to someone else.
    #[error("cart not found or not open")]
    CartNotOpen,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Checkout service.
///
/// Transitions a specific open cart, owned by the caller, into an order.
/// Order creation and the status flip happen in one transaction; a cart is
/// checked out exactly once.
pub struct CheckoutService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Check out one of the caller's open carts.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::CartNotOpen` unless the cart exists, belongs
    /// to `user`, and is open. Returns `CheckoutError::Repository` if the
    /// transaction cannot complete; in that case the cart stays open and no
    /// order exists.
    pub async fn checkout(&self, user: &User, cart_id: CartId) -> Result<Order, CheckoutError> {
        self.orders
            .checkout_cart(user.id, cart_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CheckoutError::CartNotOpen,
                other => CheckoutError::Repository(other),
            })
    }

    /// List the caller's orders.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Repository` if the query fails.
    pub async fn list_orders(&self, user: &User) -> Result<Vec<Order>, CheckoutError> {
        Ok(self.orders.list_by_owner(user.id).await?)
    }
}
