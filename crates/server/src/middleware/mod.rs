//! Request middleware.
//!
//! The session gate lives here: every protected handler declares
//! [`RequireAuth`] in its signature, which resolves the bearer token before
//! the handler runs.

pub mod auth;

pub use auth::RequireAuth;
