//! Status enums for various entities.
//!
//! Statuses are stored as TEXT in the database and serialized snake_case on
//! the wire, so the string forms here are part of the persisted format.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing a status from its string form.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {kind} status: {value}")]
pub struct StatusParseError {
    /// Which status family failed to parse ("cart" or "item").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Lifecycle state of a cart.
///
/// The only transition is `Open` -> `CheckedOut`, performed exactly once at
/// checkout. There is no edge back to `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum CartStatus {
    /// Accepts new lines; at most one per user.
    #[default]
    Open,
    /// Terminal state, reached at checkout.
    CheckedOut,
}

impl std::fmt::Display for CartStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::CheckedOut => write!(f, "checked_out"),
        }
    }
}

impl std::str::FromStr for CartStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "checked_out" => Ok(Self::CheckedOut),
            _ => Err(StatusParseError {
                kind: "cart",
                value: s.to_owned(),
            }),
        }
    }
}

/// Visibility state of a catalog item.
///
/// Items are immutable once created; the status is set at creation time and
/// defaults to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Active,
    Inactive,
    Archived,
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "archived" => Ok(Self::Archived),
            _ => Err(StatusParseError {
                kind: "item",
                value: s.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_cart_status_roundtrip() {
        assert_eq!(CartStatus::from_str("open"), Ok(CartStatus::Open));
        assert_eq!(
            CartStatus::from_str("checked_out"),
            Ok(CartStatus::CheckedOut)
        );
        assert_eq!(CartStatus::Open.to_string(), "open");
        assert_eq!(CartStatus::CheckedOut.to_string(), "checked_out");
    }

    #[test]
    fn test_cart_status_rejects_unknown() {
        let err = CartStatus::from_str("abandoned").unwrap_err();
        assert_eq!(err.kind, "cart");
        assert_eq!(err.value, "abandoned");
    }

    #[test]
    fn test_item_status_default_is_active() {
        assert_eq!(ItemStatus::default(), ItemStatus::Active);
    }

    #[test]
    fn test_item_status_roundtrip() {
        for status in [ItemStatus::Active, ItemStatus::Inactive, ItemStatus::Archived] {
            assert_eq!(ItemStatus::from_str(&status.to_string()), Ok(status));
        }
        assert!(ItemStatus::from_str("ACTIVE").is_err());
    }
}
