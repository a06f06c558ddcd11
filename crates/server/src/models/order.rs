//! Order domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use tradepost_core::{CartId, OrderId, UserId};

/// An immutable order, created exactly once per cart at checkout.
///
/// Holds a non-owning reference to the cart it was created from; the cart is
/// not deleted or mutated further after checkout beyond its status flag.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The cart this order was created from.
    pub cart_id: CartId,
    /// Owning user.
    pub user_id: UserId,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}
