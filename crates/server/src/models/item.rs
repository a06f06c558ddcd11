//! Catalog item domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use tradepost_core::{ItemId, ItemStatus};

/// A catalog item.
///
/// Items are immutable once created; there are no update or delete
/// operations.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Item {
    /// Unique item ID.
    pub id: ItemId,
    /// Display name. Not unique.
    pub name: String,
    /// Visibility status, defaults to `active`.
    pub status: ItemStatus,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}
