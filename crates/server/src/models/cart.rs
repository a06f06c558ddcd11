//! Cart and cart line domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use tradepost_core::{CartId, CartLineId, CartStatus, ItemId, UserId};

/// A shopping cart.
///
/// At most one cart per user is `open` at any time (enforced by a partial
/// unique index in the store). A cart transitions to `checked_out` exactly
/// once, at checkout, and never back.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Cart {
    /// Unique cart ID.
    pub id: CartId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name, derived from the owner's username at creation.
    pub name: String,
    /// Lifecycle status.
    pub status: CartStatus,
    /// When the cart was opened.
    pub created_at: DateTime<Utc>,
    /// Lines in insertion order. Populated by the repository on reads that
    /// project the full cart; not a column.
    #[sqlx(skip)]
    pub lines: Vec<CartLine>,
}

/// A single line in a cart.
///
/// Lines are append-only: never mutated or removed. The referenced item id
/// is not checked against the catalog (known, documented gap).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartLine {
    /// Unique line ID.
    pub id: CartLineId,
    /// Owning cart.
    pub cart_id: CartId,
    /// Referenced catalog item.
    pub item_id: ItemId,
    /// When the line was added.
    pub created_at: DateTime<Utc>,
}
