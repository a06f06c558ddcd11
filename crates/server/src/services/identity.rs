//! Identity service: registration, login, and token resolution.
//!
//! # Known gaps (documented, deliberately not fixed here)
//!
//! - Credentials are compared and stored as plain text.
//! - Login overwrites the user's previous token but never revokes it
//!   server-side; there is no logout and no expiry. Sessions on other
//!   devices die only because their token stops resolving.

use sqlx::SqlitePool;
use thiserror::Error;

use tradepost_core::SessionToken;

use crate::db::{RepositoryError, UserRepository};
use crate::models::User;

/// Errors that can occur during identity operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Username or password missing from the request.
    #[error("username and password are required")]
    MissingCredentials,

    /// No user matches the presented username/password pair.
    #[error("invalid username/password")]
    InvalidCredentials,

    /// The presented session token resolves to no user.
    #[error("invalid token")]
    InvalidToken,

    /// The username is already registered.
    #[error("username already exists")]
    UsernameTaken,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Identity service.
///
/// Handles user registration, login, and bearer-token resolution.
pub struct IdentityService<'a> {
    users: UserRepository<'a>,
}

impl<'a> IdentityService<'a> {
    /// Create a new identity service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::MissingCredentials` if either field is empty.
    /// Returns `IdentityError::UsernameTaken` if the username exists.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, IdentityError> {
        if username.is_empty() || password.is_empty() {
            return Err(IdentityError::MissingCredentials);
        }

        let user = self
            .users
            .create(username, password)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => IdentityError::UsernameTaken,
                other => IdentityError::Repository(other),
            })?;

        Ok(user)
    }

    /// Log a user in, issuing a fresh session token.
    ///
    /// The new token overwrites any previous one on the user row: last login
    /// wins, and the old token silently stops resolving.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::InvalidCredentials` if no user matches both
    /// fields exactly.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionToken, IdentityError> {
        if username.is_empty() || password.is_empty() {
            return Err(IdentityError::MissingCredentials);
        }

        let user = self
            .users
            .find_by_credentials(username, password)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        let token = SessionToken::generate();
        self.users.set_token(user.id, &token).await?;

        Ok(token)
    }

    /// Resolve a session token back to its user.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::InvalidToken` if the token is empty or
    /// matches no user.
    pub async fn resolve(&self, token: &str) -> Result<User, IdentityError> {
        if token.is_empty() {
            return Err(IdentityError::InvalidToken);
        }

        self.users
            .find_by_token(token)
            .await?
            .ok_or(IdentityError::InvalidToken)
    }

    /// List all registered users.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Repository` if the query fails.
    pub async fn list(&self) -> Result<Vec<User>, IdentityError> {
        Ok(self.users.list().await?)
    }
}
