//! Core types for Tradepost.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod status;
pub mod token;

pub use id::*;
pub use status::{CartStatus, ItemStatus, StatusParseError};
pub use token::SessionToken;
