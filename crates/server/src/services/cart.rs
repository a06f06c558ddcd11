//! Cart service: find-or-create and line appends.

use sqlx::SqlitePool;
use thiserror::Error;

use tradepost_core::ItemId;

use crate::db::{CartRepository, RepositoryError, UserRepository};
use crate::models::{Cart, CartLine, User};

/// How many times find-or-create re-runs after losing a creation race.
///
/// One retry is enough for the ordinary race (the loser finds the winner's
/// cart); the extra attempt covers the winner checking out in between.
const MAX_FIND_OR_CREATE_ATTEMPTS: u32 = 3;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Find-or-create kept losing the open-cart race and ran out of
    /// attempts.
    #[error("could not find or create an open cart")]
    OpenCartContended,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Cart service.
///
/// Owns the "exactly one open cart per user" invariant. The store's partial
/// unique index is the arbiter under concurrency; this service supplies the
/// find-or-create loop on top of it.
pub struct CartService<'a> {
    carts: CartRepository<'a>,
    users: UserRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            carts: CartRepository::new(pool),
            users: UserRepository::new(pool),
        }
    }

    /// Add an item to the user's open cart, opening one if needed.
    ///
    /// The item id is not checked against the catalog (known, documented
    /// gap). On success the user's cached open-cart pointer is refreshed and
    /// the returned cart carries its full line list.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` on storage faults; no duplicate cart
    /// is created in that case.
    pub async fn add_item(
        &self,
        user: &User,
        item_id: ItemId,
    ) -> Result<(Cart, CartLine), CartError> {
        let mut cart = self.find_or_create_open(user).await?;

        let line = self.carts.add_line(cart.id, item_id).await?;
        self.users.set_open_cart(user.id, cart.id).await?;

        cart.lines = self.carts.lines(cart.id).await?;

        Ok((cart, line))
    }

    /// List all carts with their lines.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the query fails.
    pub async fn list(&self) -> Result<Vec<Cart>, CartError> {
        Ok(self.carts.list_with_lines().await?)
    }

    /// Find the user's open cart or create one.
    ///
    /// Two concurrent first-time callers both observe "no open cart"; the
    /// partial unique index fails the second insert, and the loser re-runs
    /// the lookup to pick up the winner's cart.
    async fn find_or_create_open(&self, user: &User) -> Result<Cart, CartError> {
        for _ in 0..MAX_FIND_OR_CREATE_ATTEMPTS {
            if let Some(cart) = self.carts.find_open_by_owner(user.id).await? {
                return Ok(cart);
            }

            let name = format!("Cart for {}", user.username);
            match self.carts.create(user.id, &name).await {
                Ok(cart) => return Ok(cart),
                Err(RepositoryError::Conflict(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }

        Err(CartError::OpenCartContended)
    }
}
