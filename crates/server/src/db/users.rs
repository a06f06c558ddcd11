//! User repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;

use tradepost_core::{CartId, SessionToken, UserId};

use super::RepositoryError;
use crate::models::User;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, username: &str, password: &str) -> Result<User, RepositoryError> {
        let created_at = Utc::now();

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, password, created_at) \
             VALUES (?1, ?2, ?3) \
             RETURNING id",
        )
        .bind(username)
        .bind(password)
        .bind(created_at)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(User {
            id: UserId::new(id),
            username: username.to_owned(),
            password: password.to_owned(),
            token: None,
            cart_id: None,
            created_at,
        })
    }

    /// Get a user matching both username and password exactly.
    ///
    /// Plain-text comparison, mirroring how credentials are stored (known,
    /// documented gap).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, token, cart_id, created_at \
             FROM users \
             WHERE username = ?1 AND password = ?2",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get the user holding a session token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, token, cart_id, created_at \
             FROM users \
             WHERE token = ?1",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Persist a fresh session token onto a user, overwriting any prior one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_token(
        &self,
        user_id: UserId,
        token: &SessionToken,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET token = ?1 WHERE id = ?2")
            .bind(token.as_str())
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Update the user's cached open-cart pointer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_open_cart(
        &self,
        user_id: UserId,
        cart_id: CartId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET cart_id = ?1 WHERE id = ?2")
            .bind(cart_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List all users in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, password, token, cart_id, created_at \
             FROM users \
             ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }
}
