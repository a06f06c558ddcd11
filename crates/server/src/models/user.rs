//! User domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use tradepost_core::{CartId, SessionToken, UserId};

/// A registered user.
///
/// The `password` and `token` fields are credential material: they are read
/// from and written to the store but never serialized into a response.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique username.
    pub username: String,
    /// Stored as plain text (known, documented gap; out of scope to fix).
    #[serde(skip_serializing)]
    pub password: String,
    /// Current session token, if the user has logged in. Overwritten on
    /// every login; the previous token stops resolving.
    #[serde(skip_serializing)]
    pub token: Option<SessionToken>,
    /// Cached pointer to the user's open cart. The cart row's status is the
    /// source of truth; this pointer goes stale once that cart checks out.
    pub cart_id: Option<CartId>,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
